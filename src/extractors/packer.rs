//! Decoder for `eval(function(p,a,c,k,e,d){...})` packed scripts.
//!
//! Hosters wrap their player setup in this packer; the payload is plain
//! JavaScript once every base-N token is swapped back for its symbol.

use anyhow::{anyhow, Result};
use regex::Regex;

const ALPHABET_62: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn is_packed(script: &str) -> bool {
    script.contains("eval(function(p,a,c,k,e,")
}

/// Unpacks the first packed script found in `source`.
pub fn unpack(source: &str) -> Result<String> {
    let re = Regex::new(r#"(?s)\}\s*\(\s*'(.*?)'\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*'(.*?)'\.split\('\|'\)"#)?;
    let captures = re
        .captures(source)
        .ok_or_else(|| anyhow!("no packed script found"))?;

    let payload = captures[1].replace("\\'", "'");
    let radix: u32 = captures[2].parse()?;
    let count: usize = captures[3].parse()?;
    let symbols: Vec<&str> = captures.get(4).map(|m| m.as_str()).unwrap_or_default().split('|').collect();

    if symbols.len() != count {
        tracing::debug!("packer symbol count mismatch: {} declared, {} found", count, symbols.len());
    }
    if !(2..=62).contains(&radix) {
        return Err(anyhow!("unsupported packer radix {}", radix));
    }

    let word = Regex::new(r"\b\w+\b")?;
    let unpacked = word.replace_all(&payload, |c: &regex::Captures| {
        let token = &c[0];
        match unbase(token, radix) {
            Some(index) if index < symbols.len() && !symbols[index].is_empty() => {
                symbols[index].to_string()
            }
            _ => token.to_string(),
        }
    });

    Ok(unpacked.into_owned())
}

fn unbase(token: &str, radix: u32) -> Option<usize> {
    if radix <= 36 {
        return usize::from_str_radix(token, radix).ok();
    }
    token.chars().try_fold(0usize, |acc, ch| {
        let digit = ALPHABET_62.find(ch)?;
        if digit as u32 >= radix {
            return None;
        }
        acc.checked_mul(radix as usize)?.checked_add(digit)
    })
}

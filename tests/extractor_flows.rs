mod common;

use ani_resolver::core::{Extractor, HttpClient, Quality};
use ani_resolver::extractors::{DoodStream, Mp4Upload, MultiQuality, Shiro};
use anyhow::Result;
use common::FakeHttp;
use std::sync::Arc;

const DOOD_EMBED: &str = "https://dood.la/e/q8k2";
const DOOD_PASS: &str = "https://dood.la/pass_md5/77-12-3/q8k2tok";
const DOOD_PAGE: &str = r#"<script>$.get('/pass_md5/77-12-3/q8k2tok', function(data) { makePlay(data); });</script>"#;

fn client(http: &Arc<FakeHttp>) -> Arc<dyn HttpClient> {
    http.clone()
}

#[tokio::test]
async fn test_doodstream_fetches_pass_md5_with_referer() -> Result<()> {
    let http = Arc::new(FakeHttp::new());
    http.route(DOOD_EMBED, DOOD_PAGE);
    http.route(DOOD_PASS, "https://wa12.dood.video/abc/q8k2~\n");

    let links = DoodStream::new(client(&http)).extract(DOOD_EMBED, None).await?;

    assert_eq!(links.len(), 1);
    assert!(links[0].url.starts_with("https://wa12.dood.video/abc/q8k2~"));
    assert!(links[0].url.contains("?token=q8k2tok&expiry="));
    assert_eq!(links[0].referer.as_deref(), Some("https://dood.la/"));

    let calls = http.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, DOOD_PASS);
    assert!(calls[1].1.contains(&("Referer".to_string(), DOOD_EMBED.to_string())));
    Ok(())
}

#[tokio::test]
async fn test_doodstream_empty_prefix_yields_nothing() -> Result<()> {
    let http = Arc::new(FakeHttp::new());
    http.route(DOOD_EMBED, DOOD_PAGE);
    http.route(DOOD_PASS, "  \n");
    let dood = DoodStream::new(client(&http));

    assert!(dood.extract(DOOD_EMBED, None).await?.is_empty());
    assert!(dood.get_url(DOOD_EMBED, None).await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_mp4upload_packed_page() -> Result<()> {
    let embed = "https://www.mp4upload.com/embed-x1y2.html";
    let page = r#"<html><body><script type="text/javascript">eval(function(p,a,c,k,e,d){while(c--)if(k[c])p=p.replace(new RegExp('\\b'+c.toString(a)+'\\b','g'),k[c]);return p}('0.1("2://3.4.5/6.7")',10,8,'player|src|https|s3|mp4upload|com|video|mp4'.split('|'),0,{}))</script></body></html>"#;
    let http = Arc::new(FakeHttp::new());
    http.route(embed, page);

    let links = Mp4Upload::new(client(&http))
        .extract(embed, Some("https://mirror.example/streaming.php?id=1"))
        .await?;

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://s3.mp4upload.com/video.mp4");
    assert_eq!(links[0].referer.as_deref(), Some(embed));
    assert!(http.calls()[0]
        .1
        .contains(&("Referer".to_string(), "https://mirror.example/streaming.php?id=1".to_string())));
    Ok(())
}

#[tokio::test]
async fn test_shiro_extract() -> Result<()> {
    let http = Arc::new(FakeHttp::new());
    let shiro = Shiro::new(client(&http));
    let url = shiro.extractor_url("MTE3");
    http.route(
        &url,
        r#"<video><source src="/media/MTE3-720.mp4" size="720"><source src="//cdn.example/MTE3-1080.mp4" size="1080"></video>"#,
    );

    let links = shiro.extract(&url, None).await?;

    assert_eq!(url, "https://cherry.subsplea.se/vidstreaming/MTE3");
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].url, "https://cherry.subsplea.se/media/MTE3-720.mp4");
    assert_eq!(links[0].quality, Quality::P720);
    assert_eq!(links[1].url, "https://cdn.example/MTE3-1080.mp4");
    assert_eq!(links[1].quality, Quality::P1080);
    assert!(links.iter().all(|l| l.source == "Shiro" && l.referer.is_none()));
    Ok(())
}

#[tokio::test]
async fn test_multi_quality_extract() -> Result<()> {
    let http = Arc::new(FakeHttp::new());
    let multi = MultiQuality::new(client(&http));
    let url = multi.extractor_url("MTE3");
    http.route(
        &url,
        r#"<div class="mirror_link">
             <div class="dowload"><a href="https://cdn.example/MTE3.480.mp4">Download (480P - mp4)</a></div>
             <div class="dowload"><a href="https://dood.la/d/zz">Download Doodstream</a></div>
           </div>"#,
    );

    let links = multi.extract(&url, None).await?;

    assert_eq!(url, "https://gogo-play.net/download?id=MTE3");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://cdn.example/MTE3.480.mp4");
    assert_eq!(links[0].quality, Quality::P480);

    // A page with no files is absorbed by get_url.
    http.route(&url, "<html></html>");
    assert!(multi.get_url(&url, None).await.is_none());
    Ok(())
}

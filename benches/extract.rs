// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use venue_scrape::specs::{listing, reviews, venue};

const REVIEW: &str = r#"
<div class="review-post" itemprop="review">
  <div itemprop="author"><a href="/en/gourmet/user?userid=12345"><span>foodie</span></a></div>
  <div class="grade-name">Level 3</div>
  <div class="review-title"><a class="title">Great broth</a></div>
  <div class="review-scores">
    <div class="row"><div class="name">Taste</div><div class="stars"><span class="common_yellowstar_desktop"></span><span class="common_yellowstar_desktop"></span><span class="common_yellowstar_desktop"></span></div></div>
    <div class="row"><div class="name">Service</div><div class="stars"><span class="common_yellowstar_desktop"></span><span class="common_yellowstar_desktop"></span></div></div>
  </div>
  <div class="main-review"><div class="review-container">Rich broth.<br>Will return.</div></div>
  <div class="info"><div class="info-row"><div class="title">Date of Visit</div><div class="text">2019-05-01</div></div></div>
  <span itemprop="datepublished">2019-05-02</span>
  <div class="recommend-dish-name-list"><span class="dish-name">Wonton</span></div>
</div>"#;

const VENUE: &str = r#"
<html><body>
<div class="poi-name"><span class="name">Noodle Bar</span></div>
<div class="header-poi-district"><a>Central</a></div>
<div class="header-poi-categories"><a>Noodles</a><a>Hong Kong Style</a></div>
<div class="opening-hours-day"><div class="opening-hours-date">Mon - Sun</div><div class="opening-hours-time"><div>11:00 - 22:00</div></div></div>
</body></html>"#;

fn review_page(n: usize) -> String {
    format!(
        "<html><body>{}<div class=\"common_pagination_more_r_desktop\">More</div></body></html>",
        REVIEW.repeat(n)
    )
}

fn listing_page(n: u64) -> String {
    let results: Vec<String> = (1..=n)
        .map(|i| format!(r#"{{"poiId":{i},"name":"V{i}","urlUI":"/en/r-v-r{i}","reviewUrlUI":"/en/r-v-r{i}/reviews"}}"#))
        .collect();
    format!(r#"{{"searchResult":{{"paginationResult":{{"results":[{}]}}}}}}"#, results.join(","))
}

fn bench_extract(c: &mut Criterion) {
    let reviews_html = review_page(15);
    let listing_json = listing_page(15);

    c.bench_function("review_page_15", |b| {
        b.iter(|| {
            let page = reviews::parse_page(black_box(&reviews_html), "u");
            black_box(page.items.len())
        })
    });

    c.bench_function("venue_page", |b| {
        b.iter(|| black_box(venue::parse_venue(black_box(VENUE), "u")))
    });

    c.bench_function("listing_page_15", |b| {
        b.iter(|| {
            let page = listing::parse_page(black_box(&listing_json), "u").map(|p| p.items.len());
            black_box(page)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);

use crate::url::Region;
use crate::Result;
use url::Url;

/// Builds a search results URL: `<base>/s?k=<query>&page=<n>`
///
/// The query is form-encoded, so reserved characters survive intact.
///
/// # Examples
///
/// ```
/// use skyquake::url::build_search_url;
///
/// let url = build_search_url("UK", "keyboard", 2).unwrap();
/// assert_eq!(url.as_str(), "https://www.amazon.co.uk/s?k=keyboard&page=2");
/// ```
pub fn build_search_url(region: &str, query: &str, page: u32) -> Result<Url> {
    let mut url = storefront(region)?;
    url.set_path("/s");
    url.query_pairs_mut()
        .append_pair("k", query)
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Builds a product review URL:
/// `<base>/<product-name>/product-reviews/<product-id>/?reviewerType=all_reviews&pageNumber=<n>`
pub fn build_review_url(
    region: &str,
    product_name: &str,
    product_id: &str,
    page: u32,
) -> Result<Url> {
    let mut url = storefront(region)?;
    set_segments(&mut url, &[product_name, "product-reviews", product_id, ""])?;
    url.query_pairs_mut()
        .append_pair("reviewerType", "all_reviews")
        .append_pair("pageNumber", &page.to_string());
    Ok(url)
}

/// Builds a product question URL:
/// `<base>/<product-id>/questions/?isAnswered=true&pageNumber=<n>`
pub fn build_question_url(region: &str, product_id: &str, page: u32) -> Result<Url> {
    let mut url = storefront(region)?;
    set_segments(&mut url, &[product_id, "questions", ""])?;
    url.query_pairs_mut()
        .append_pair("isAnswered", "true")
        .append_pair("pageNumber", &page.to_string());
    Ok(url)
}

/// Pre-builds the URLs for pages `1..=page`
///
/// Nothing is built when `page` reaches `page_limit`; callers asking for too
/// many pages get an empty list rather than an error.
pub fn page_urls<F>(page: u32, page_limit: u32, mut build: F) -> Result<Vec<Url>>
where
    F: FnMut(u32) -> Result<Url>,
{
    if page >= page_limit {
        return Ok(Vec::new());
    }
    (1..=page).map(&mut build).collect()
}

fn storefront(region: &str) -> Result<Url> {
    let region: Region = region.parse()?;
    Ok(Url::parse(&region.base_url())?)
}

fn set_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .clear()
        .extend(segments);
    Ok(())
}

use url::Url;

/// Query parameter carrying the 1-based listing page number
pub const PAGE_PARAM: &str = "page";

/// Builds the URL of listing page `page` for a collection
///
/// Any `page` parameter already present on the collection URL is replaced;
/// every other query parameter is kept in its original order.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::listing_page_url;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/collections/all").unwrap();
/// assert_eq!(
///     listing_page_url(&base, 3).as_str(),
///     "https://shop.example.com/collections/all?page=3"
/// );
/// ```
pub fn listing_page_url(base: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(PAGE_PARAM, &page.to_string());
    }

    url
}

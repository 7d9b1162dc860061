/// Cache key for a trimmed query. Only case is folded, since matching runs
/// substring checks on the lower-cased text and spacing can change the answer.
pub fn search_cache_key(query: &str) -> String {
    format!("{:x}", md5::compute(query.to_lowercase().as_bytes()))
}

//! Property-name translation between snake_case and camelCase.

/// Translates a snake_case name to camelCase.
///
/// Underscore runs separate segments; leading, trailing and repeated underscores
/// collapse. The first segment gets a lowercase first character, every later segment
/// an uppercase first character, and all other characters keep their case, so
/// acronyms survive.
///
/// # Examples
///
/// ```
/// use protobind_util::naming::snake_to_camel;
///
/// assert_eq!(snake_to_camel("start_at"), "startAt");
/// assert_eq!(snake_to_camel("__start__at__"), "startAt");
/// assert_eq!(snake_to_camel("original_URL"), "originalURL");
/// assert_eq!(snake_to_camel("applyToAllSkus"), "applyToAllSkus");
/// ```
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('_').filter(|s| !s.is_empty()).enumerate() {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Translates a camelCase name to snake_case.
///
/// Leading underscores are dropped. An uppercase letter becomes lowercase and is
/// preceded by `_` unless the previous character was also a translated uppercase
/// letter or an underscore, so `screenshotURLs` becomes `screenshot_urls`.
/// A name that translates to nothing is returned unchanged.
///
/// # Examples
///
/// ```
/// use protobind_util::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("applyToAllSkus"), "apply_to_all_skus");
/// assert_eq!(camel_to_snake("screenshotURLs"), "screenshot_urls");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_translated = false;
    let mut leading = true;
    for c in name.chars() {
        if leading && c == '_' {
            continue;
        }
        leading = false;
        if c.is_uppercase() {
            if !prev_translated && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_translated = true;
        } else {
            out.push(c);
            prev_translated = false;
        }
    }
    if out.is_empty() {
        name.to_string()
    } else {
        out
    }
}

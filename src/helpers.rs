use crate::constants::PATH_SEPARATOR;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

lazy_static! {
    static ref REPEATED_SEPARATORS: Regex = Regex::new("/{2,}").unwrap();
}

pub(crate) fn percent_decode_value(val: &str) -> crate::Result<String> {
    percent_decode_str(val)
        .decode_utf8()
        .map(|val| val.to_string())
        .map_err(Into::into)
}

/// Trims the path separators on both ends, wraps the rest in exactly one separator on each side and collapses any
/// repeated separators, so `"//users//42"` becomes `"/users/42/"` and `""` becomes `"/"`.
pub(crate) fn normalise_path(path: &str) -> String {
    let trimmed = path.trim_matches(PATH_SEPARATOR);
    let wrapped = format!("{sep}{trimmed}{sep}", sep = PATH_SEPARATOR);
    REPEATED_SEPARATORS.replace_all(&wrapped, "/").into_owned()
}

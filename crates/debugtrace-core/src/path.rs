/// Last component of a source path, accepting both `/` and `\` separators.
pub fn short_file_name(path: &str) -> &str {
    match path.rfind('/').or_else(|| path.rfind('\\')) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

//! Support code for the exported macros.

pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Turn the type name of a marker fn nested in a function into the path of
/// that function.
pub fn function_name(marker_path: &'static str) -> &'static str {
    let mut name = marker_path
        .strip_suffix("::__debugtrace_marker")
        .unwrap_or(marker_path);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

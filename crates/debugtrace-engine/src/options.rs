use debugtrace_core::TypeNameStyle;

/// Formatting knobs read by the renderer.
///
/// Strings are borrowed so a renderer can be built straight from the
/// tracer's configuration on every call without cloning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions<'a> {
    /// Marker that replaces the elements beyond `collection_limit`
    pub limit_string: &'a str,
    /// Data indentation stops growing past this depth
    pub maximum_indents: usize,
    pub data_indent_string: &'a str,
    pub open_string: &'a str,
    pub close_string: &'a str,
    /// Separator between elements of an inline container
    pub delimiter: &'a str,
    /// Separator between the key and value of a pair
    pub pair_separator: &'a str,
    /// Containers wider than this (in chars) are expanded onto several lines
    pub maximum_data_output_width: usize,
    pub collection_limit: usize,
    pub type_names: TypeNameStyle,
}

impl Default for RenderOptions<'static> {
    fn default() -> Self {
        Self {
            limit_string: "...",
            maximum_indents: 20,
            data_indent_string: "  ",
            open_string: "{",
            close_string: "}",
            delimiter: ", ",
            pair_separator: ": ",
            maximum_data_output_width: 80,
            collection_limit: 256,
            type_names: TypeNameStyle::Short,
        }
    }
}

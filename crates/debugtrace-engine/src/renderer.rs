use crate::options::RenderOptions;
use debugtrace_core::{TextEncoder, indent_string, to_narrow_or_placeholder};
use debugtrace_types::{FloatValue, TextSource, Value};

/// Recursive value renderer.
///
/// Holds the data nesting depth for the duration of one render call. The
/// depth only affects the indentation of lines inside expanded containers
/// and is back at zero once [`Renderer::render`] returns.
pub struct Renderer<'a> {
    options: &'a RenderOptions<'a>,
    encoder: &'a dyn TextEncoder,
    data_level: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions<'a>, encoder: &'a dyn TextEncoder) -> Self {
        Self {
            options,
            encoder,
            data_level: 0,
        }
    }

    /// Current data nesting depth (zero outside of a render call).
    pub fn data_level(&self) -> usize {
        self.data_level
    }

    /// Render a top-level value. Always returns at least one line.
    pub fn render(&mut self, value: &Value) -> Vec<String> {
        self.data_level = 0;
        self.lines(value)
    }

    fn lines(&mut self, value: &Value) -> Vec<String> {
        let line = match value {
            Value::Container {
                type_name,
                elements,
            } => return self.container(type_name, elements),
            Value::Pair(key, value) => return self.pair(key, value),
            Value::Pointer {
                type_name,
                target: Some(target),
            } => return self.pointee(type_name, target),
            Value::Pointer {
                type_name,
                target: None,
            } => format!("({})nullptr", self.type_name(type_name)),
            Value::Bool(value) => value.to_string(),
            Value::Char(ch) => format!("(char)'{}'", ch.escape_debug()),
            Value::Int { kind, value } => match kind.annotation() {
                Some(annotation) => format!("({}){}", annotation, value),
                None => format!("{}{}", value, kind.suffix()),
            },
            Value::Float(FloatValue::Single(value)) => float_text(*value, value.is_finite(), "f32", "f"),
            Value::Float(FloatValue::Double(value)) => float_text(*value, value.is_finite(), "f64", ""),
            Value::Text {
                annotation,
                source: Some(source),
            } => format!("({}){}", annotation, self.quoted(source)),
            Value::Text {
                annotation,
                source: None,
            } => format!("({})nullptr", annotation),
            Value::Address {
                type_name,
                address: Some(address),
            } => format!("({}){:#x}", self.type_name(type_name), address),
            Value::Address {
                type_name,
                address: None,
            } => format!("({})nullptr", self.type_name(type_name)),
            Value::Other { type_name, text } => format!("({}){}", self.type_name(type_name), text),
        };
        vec![line]
    }

    fn pointee(&mut self, type_name: &str, target: &Value) -> Vec<String> {
        let prefix = format!("({})&", self.type_name(type_name));
        let mut lines = self.lines(target);
        if let Some(first) = lines.first_mut() {
            first.insert_str(0, &prefix);
        }
        lines
    }

    fn quoted(&self, source: &TextSource) -> String {
        let text = match source {
            TextSource::Utf8(text) => text.clone(),
            other => to_narrow_or_placeholder(self.encoder, other),
        };
        format!("\"{}\"", text)
    }

    fn pair(&mut self, key: &Value, value: &Value) -> Vec<String> {
        let mut lines = self.lines(key);
        let value_lines = self.lines(value);

        let Some(last) = lines.last_mut() else {
            return value_lines;
        };
        last.push_str(self.options.pair_separator);

        let width = last.chars().count();
        let first_width = value_lines.first().map_or(0, |line| line.chars().count());
        if width + first_width <= self.options.maximum_data_output_width {
            let mut rest = value_lines.into_iter();
            if let Some(first) = rest.next() {
                last.push_str(&first);
            }
            lines.extend(rest);
            return lines;
        }

        // A wrapped value moves one level deeper as a whole block.
        let indent = self.data_indent(self.data_level + 1);
        let wrapped = self.descend(|renderer| renderer.lines(value));
        for (index, value_line) in wrapped.into_iter().enumerate() {
            if index == 0 {
                lines.push(indent.clone() + &value_line);
            } else {
                lines.push(value_line);
            }
        }
        lines
    }

    fn container(&mut self, type_name: &str, elements: &[Value]) -> Vec<String> {
        let header = format!(
            "({} size:{}){}",
            self.type_name(type_name),
            elements.len(),
            self.options.open_string
        );
        let truncated = elements.len() > self.options.collection_limit;
        let shown = &elements[..elements.len().min(self.options.collection_limit)];

        // Single-line renderings carry no indentation, so each element is
        // rendered once at the expanded depth and reused for the inline attempt.
        let rendered: Vec<Vec<String>> =
            self.descend(|renderer| shown.iter().map(|element| renderer.lines(element)).collect());

        if !truncated && let Some(inline) = self.inline(&header, &rendered) {
            return vec![inline];
        }

        let mut lines = vec![header];
        let indent = self.data_indent(self.data_level + 1);
        for element_lines in rendered {
            for (index, line) in element_lines.into_iter().enumerate() {
                if index == 0 {
                    lines.push(format!("{}{}", indent, line));
                } else {
                    lines.push(line);
                }
            }
            if let Some(last) = lines.last_mut() {
                last.push(',');
            }
        }
        if truncated {
            lines.push(format!("{}{}", indent, self.options.limit_string));
        }
        lines.push(self.data_indent(self.data_level) + self.options.close_string);
        lines
    }

    /// Inline form `header e1, e2 close`, or `None` when an element spans
    /// several lines or the line would exceed the width limit.
    fn inline(&self, header: &str, rendered: &[Vec<String>]) -> Option<String> {
        let mut line = header.to_string();
        let mut width = line.chars().count();

        for (index, element_lines) in rendered.iter().enumerate() {
            let [element] = element_lines.as_slice() else {
                return None;
            };
            if index > 0 {
                line.push_str(self.options.delimiter);
                width += self.options.delimiter.chars().count();
            }
            line.push_str(element);
            width += element.chars().count();
            if width > self.options.maximum_data_output_width {
                return None;
            }
        }

        line.push_str(self.options.close_string);
        Some(line)
    }

    fn descend<R>(&mut self, render: impl FnOnce(&mut Self) -> R) -> R {
        self.data_level += 1;
        let result = render(self);
        self.data_level -= 1;
        result
    }

    fn data_indent(&self, level: usize) -> String {
        indent_string(
            self.options.data_indent_string,
            level,
            self.options.maximum_indents,
        )
    }

    fn type_name(&self, type_name: &str) -> String {
        self.options.type_names.apply(type_name)
    }
}

/// Plain decimal form, never exponent notation. Non-finite values carry the
/// float type as an annotation since they have no literal form.
fn float_text<F: std::fmt::Display>(value: F, is_finite: bool, annotation: &str, suffix: &str) -> String {
    if !is_finite {
        return format!("({}){}", annotation, value);
    }
    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text.push_str(suffix);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use debugtrace_core::CodePageEncoder;
    use debugtrace_types::Traceable;

    fn render<T: Traceable + ?Sized>(value: &T) -> Vec<String> {
        let options = RenderOptions::default();
        let encoder = CodePageEncoder::default();
        Renderer::new(&options, &encoder).render(&value.to_value())
    }

    fn render_with<T: Traceable + ?Sized>(value: &T, options: RenderOptions<'_>) -> Vec<String> {
        let encoder = CodePageEncoder::default();
        Renderer::new(&options, &encoder).render(&value.to_value())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&true), vec!["true"]);
        assert_eq!(render(&-22i32), vec!["-22"]);
        assert_eq!(render(&22u32), vec!["22u"]);
        assert_eq!(render(&-111i64), vec!["-111l"]);
        assert_eq!(render(&222u64), vec!["222ul"]);
        assert_eq!(render(&-1111i128), vec!["-1111ll"]);
        assert_eq!(render(&2222u128), vec!["2222ull"]);
        assert_eq!(render(&5usize), vec!["5uz"]);
        assert_eq!(render(&-5isize), vec!["-5z"]);
        assert_eq!(render(&-1i8), vec!["(i8)-1"]);
        assert_eq!(render(&255u8), vec!["(u8)255"]);
        assert_eq!(render(&2u16), vec!["(u16)2"]);
    }

    #[test]
    fn test_floats_and_chars() {
        assert_eq!(render(&-11.11f32), vec!["-11.11f"]);
        assert_eq!(render(&-2222.2222f64), vec!["-2222.2222"]);
        assert_eq!(render(&1.0f64), vec!["1.0"]);
        assert_eq!(render(&1e20f64), vec!["100000000000000000000.0"]);
        assert_eq!(render(&1e-7f32), vec!["0.0000001f"]);
        assert_eq!(render(&'A'), vec!["(char)'A'"]);
        assert_eq!(render(&'\n'), vec!["(char)'\\n'"]);
    }

    #[test]
    fn test_text() {
        assert_eq!(render("abc"), vec!["(&str)\"abc\""]);
        assert_eq!(render(&"abc".to_string()), vec!["(String)\"abc\""]);
        assert_eq!(render(&None::<&str>), vec!["(&str)nullptr"]);
        assert_eq!(render(&None::<String>), vec!["(String)nullptr"]);
    }

    #[test]
    fn test_option_pointer() {
        assert_eq!(render(&None::<i32>), vec!["(Option<i32>)nullptr"]);
        assert_eq!(render(&Some(7i32)), vec!["(Option<i32>)&7"]);
    }

    #[test]
    fn test_null_raw_pointer() {
        let pointer: *const i32 = std::ptr::null();
        assert_eq!(render(&pointer), vec!["(*const i32)nullptr"]);

        let value = 1i32;
        let pointer: *const i32 = &value;
        let line = &render(&pointer)[0];
        assert!(line.starts_with("(*const i32)0x"), "{}", line);
    }

    #[test]
    fn test_empty_container() {
        assert_eq!(render(&Vec::<i32>::new()), vec!["(Vec<i32> size:0){}"]);
    }

    #[test]
    fn test_pair_inline() {
        assert_eq!(render(&(1i32, "one")), vec!["1: (&str)\"one\""]);
    }

    #[test]
    fn test_pair_value_wraps_when_too_wide() {
        let options = RenderOptions {
            maximum_data_output_width: 10,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_with(&("key", "value"), options),
            vec!["(&str)\"key\": ", "  (&str)\"value\""]
        );
    }

    #[test]
    fn test_non_finite_floats_are_annotated() {
        assert_eq!(render(&f64::NAN), vec!["(f64)NaN"]);
        assert_eq!(render(&f32::INFINITY), vec!["(f32)inf"]);
        assert_eq!(render(&f64::NEG_INFINITY), vec!["(f64)-inf"]);
    }

    #[test]
    fn test_wrapped_pair_value_shifts_as_a_block() {
        let options = RenderOptions {
            maximum_data_output_width: 20,
            ..RenderOptions::default()
        };
        assert_eq!(
            render_with(&("a fairly long key", vec![1i32, 2, 3]), options),
            vec![
                "(&str)\"a fairly long key\": ",
                "  (Vec<i32> size:3){",
                "    1,",
                "    2,",
                "    3,",
                "  }",
            ]
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let options = RenderOptions {
            open_string: "[",
            close_string: "]",
            delimiter: "; ",
            ..RenderOptions::default()
        };
        assert_eq!(render_with(&[1, 2], options), vec!["([i32; 2] size:2)[1; 2]"]);
    }

    #[test]
    fn test_hidden_type_names() {
        let options = RenderOptions {
            type_names: debugtrace_core::TypeNameStyle::Hidden,
            ..RenderOptions::default()
        };
        assert_eq!(render_with(&vec![1u32], options), vec!["(? size:1){1u}"]);
    }

    #[test]
    fn test_truncation_restores_data_level() {
        let options = RenderOptions {
            collection_limit: 2,
            ..RenderOptions::default()
        };
        let encoder = CodePageEncoder::default();
        let mut renderer = Renderer::new(&options, &encoder);
        let lines = renderer.render(&vec![1, 2, 3].to_value());
        assert_eq!(lines, vec!["(Vec<i32> size:3){", "  1,", "  2,", "  ...", "}"]);
        assert_eq!(renderer.data_level(), 0);
    }

    #[test]
    fn test_non_canonical_text_is_transcoded() {
        let wide = debugtrace_types::WideString::from("wide");
        assert_eq!(render(&wide), vec!["(WideString)\"wide\""]);

        let broken = debugtrace_types::WideString::new(vec![0xd800]);
        assert_eq!(
            render(&broken),
            vec!["(WideString)\"<Cannot convert the wide string to string>\""]
        );
    }
}

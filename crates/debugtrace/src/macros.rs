//! Trace macros.
//!
//! Every macro has two definitions: the real one behind the `enabled`
//! feature and an empty one that drops its arguments unevaluated.

/// Path of the enclosing function, e.g. `my_crate::server::run`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __debugtrace_marker() {}
        $crate::__private::function_name($crate::__private::type_name_of(__debugtrace_marker))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __location {
    () => {
        ::core::option::Option::Some($crate::SourceLocation::new(file!(), line!()))
    };
}

/// Trace the enclosing function until the end of the current block.
///
/// ```
/// fn parse(input: &str) -> usize {
///     debugtrace::trace_enter!();
///     input.len()
/// }
/// # parse("abc");
/// ```
///
/// Pass a label to name the scope yourself: `trace_enter!("loading")`.
#[macro_export]
#[cfg(feature = "enabled")]
macro_rules! trace_enter {
    () => {
        let _debugtrace_scope = $crate::enter_at($crate::__function_name!(), $crate::__location!());
    };
    ($label:expr) => {
        let _debugtrace_scope = $crate::enter_at($label, $crate::__location!());
    };
}

#[macro_export]
#[cfg(not(feature = "enabled"))]
macro_rules! trace_enter {
    ($($arg:tt)*) => {};
}

/// Print a value with its expression text as the name, or with an explicit name.
///
/// ```
/// let ids = vec![1, 2, 3];
/// debugtrace::trace_print!(ids);
/// debugtrace::trace_print!("first", ids[0]);
/// ```
#[macro_export]
#[cfg(feature = "enabled")]
macro_rules! trace_print {
    ($name:literal, $value:expr) => {
        $crate::print_at($name, &$value, $crate::__location!())
    };
    ($value:expr) => {
        $crate::print_at(stringify!($value), &$value, $crate::__location!())
    };
}

#[macro_export]
#[cfg(not(feature = "enabled"))]
macro_rules! trace_print {
    ($($arg:tt)*) => {};
}

/// Print a formatted message line.
#[macro_export]
#[cfg(feature = "enabled")]
macro_rules! trace_message {
    ($($arg:tt)+) => {
        $crate::message_at(&format!($($arg)+), $crate::__location!())
    };
}

#[macro_export]
#[cfg(not(feature = "enabled"))]
macro_rules! trace_message {
    ($($arg:tt)*) => {};
}

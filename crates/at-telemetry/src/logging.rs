//! Logging macros with the standard taxonomy fields.
//!
//! Every event carries `subsystem`; term events add `term_id` and `type_id`,
//! owner events add `owner`.

/// Log a term-related event with standard fields.
#[macro_export]
macro_rules! log_term_event {
    ($level:ident, $subsystem:expr, $msg:expr, $term_id:expr, $type_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            term_id = %$term_id,
            type_id = %$type_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an event about a tagged object with standard fields.
#[macro_export]
macro_rules! log_owner_event {
    ($level:ident, $subsystem:expr, $msg:expr, $owner:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            owner = %$owner,
            $($($field)*,)?
            $msg
        )
    };
}

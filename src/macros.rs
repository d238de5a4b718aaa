/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Map literals keep their key order. Anything that is not `null`, `true`,
/// `false`, a `[...]` list or a `{...}` map goes through
/// [`to_value`](crate::to_value), so any `Serialize` expression works.
///
/// # Panics
///
/// Panics if a map literal repeats a key.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{toon, Value};
///
/// let value = toon!({
///     "name": "Alice",
///     "scores": [90, 85.5],
///     "meta": { "admin": false, "team": null }
/// });
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::ToonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::ToonMap::new();
        $(
            if let ::std::result::Result::Err(err) =
                map.try_insert($key.to_string(), $crate::toon!($value))
            {
                panic!("toon!: {}", err);
            }
        )*
        $crate::Value::Map(map)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

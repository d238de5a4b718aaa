use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::json;
use toon_codec::{
    decode, encode, from_reader, from_slice, from_str, from_value, to_string,
    to_string_with_options, to_value, to_writer, toon, EncodeOptions, FloatFormat, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Shape {
    Point,
    Circle { radius: f64 },
    Segment(i32, i32),
    Label(String),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Profile {
    nickname: Option<String>,
    age: Option<u8>,
    shapes: Vec<Shape>,
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let text = to_string(original).unwrap();
    let back: T = from_str(&text).unwrap();
    assert_eq!(original, &back, "document was:\n{}", text);
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

#[test]
fn test_simple_struct() {
    let text = to_string(&alice()).unwrap();
    assert_eq!(text, "id: 123\nname: Alice\nactive: true\ntags: admin, developer");

    let back: User = from_str(&text).unwrap();
    assert_eq!(back, alice());
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            tags: vec!["vip".to_string()],
            ..alice()
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 10.0,
                quantity: 1,
            },
        ],
        total: 69.98,
    };

    let text = to_string(&order).unwrap();
    assert!(text.contains("customer:\n  id: 123"));
    assert!(text.contains("  tags: vip,"));
    assert!(text.contains("items:\n  -\n    sku: WIDGET-001\n    price: 29.99"));
    assert!(text.contains("    price: 10.0"));

    assert_roundtrip(&order);
}

#[test]
fn test_enums() {
    let profile = Profile {
        nickname: None,
        age: Some(42),
        shapes: vec![
            Shape::Point,
            Shape::Circle { radius: 1.5 },
            Shape::Segment(-1, 4),
            Shape::Label("7".to_string()),
        ],
    };

    let text = to_string(&profile).unwrap();
    assert_eq!(
        text,
        "nickname: null\nage: 42\nshapes:\n  - Point\n  -\n    Circle:\n      radius: 1.5\n  -\n    Segment: -1, 4\n  -\n    Label: \"7\""
    );
    assert_roundtrip(&profile);
}

#[test]
fn test_options() {
    assert_roundtrip(&Some(5));
    assert_roundtrip(&None::<i32>);
    assert_roundtrip(&Some("null".to_string()));
    assert_roundtrip(&vec![Some(1), None, Some(3)]);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&-7i8);
    assert_roundtrip(&255u8);
    assert_roundtrip(&true);
    assert_roundtrip(&'x');
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&String::new());
    assert_roundtrip(&());
}

#[test]
fn test_integer_limits() {
    let limits = toon!({ "min": (i64::MIN), "max": (i64::MAX) });
    let text = encode(&limits).unwrap();
    assert_eq!(text, "min: -9223372036854775808\nmax: 9223372036854775807");
    assert_eq!(decode(&text).unwrap(), limits);

    // Beyond i64 the value travels as a float.
    let big = i64::MAX as u64 + 1;
    assert_roundtrip(&big);
}

#[test]
fn test_floats() {
    assert_roundtrip(&1.23e-4);
    assert_roundtrip(&-0.5f64);
    assert_roundtrip(&1.0e300);
    assert_roundtrip(&vec![0.1, 0.2, 0.30000000000000004]);

    let value = decode("whole: 2.0\nsmall: 1.5e-7").unwrap();
    assert_eq!(value.get("whole"), Some(&Value::Float(2.0)));
    assert_eq!(value.get("small"), Some(&Value::Float(1.5e-7)));

    let options = EncodeOptions::new().with_float_format(FloatFormat::Decimals(2));
    let text = to_string_with_options(&vec![1.23456, 2.0], &options).unwrap();
    assert_eq!(text, "1.23, 2.00");
}

#[test]
fn test_non_finite_floats_become_null() {
    let text = to_string(&vec![f64::NAN, f64::INFINITY, 1.0]).unwrap();
    assert_eq!(text, "null, null, 1.0");
}

#[test]
fn test_collections() {
    let mut scores = HashMap::new();
    scores.insert("alice".to_string(), 90);
    scores.insert("bob".to_string(), 85);
    assert_roundtrip(&scores);

    let mut by_id = BTreeMap::new();
    by_id.insert(1u32, "one".to_string());
    by_id.insert(20u32, "twenty".to_string());
    let text = to_string(&by_id).unwrap();
    assert_eq!(text, "1: one\n20: twenty");
    assert_roundtrip(&by_id);

    assert_roundtrip(&(1, "two".to_string(), false));
    assert_roundtrip(&vec![vec![1, 2], vec![], vec![3]]);
}

#[test]
fn test_empty_collections() {
    assert_eq!(to_string(&Vec::<i32>::new()).unwrap(), "[]");
    assert_eq!(to_string(&HashMap::<String, i32>::new()).unwrap(), "{}");
    assert_roundtrip(&Vec::<String>::new());
    assert_roundtrip(&BTreeMap::<String, Vec<i32>>::new());
}

#[test]
fn test_special_strings() {
    let strings = vec![
        "".to_string(),
        " padded ".to_string(),
        "a, b".to_string(),
        "key: value".to_string(),
        "line\nbreak".to_string(),
        "tab\there".to_string(),
        "quote \" inside".to_string(),
        "back\\slash".to_string(),
        "true".to_string(),
        "null".to_string(),
        "-12.5".to_string(),
        "- item".to_string(),
        "-".to_string(),
        "[]".to_string(),
        "{}".to_string(),
    ];
    assert_roundtrip(&strings);
}

#[test]
fn test_brackets_are_plain_text() {
    let value = toon!({ "brackets": "[content]", "braces": "{a}" });
    let text = encode(&value).unwrap();
    assert_eq!(text, "brackets: [content]\nbraces: {a}");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_deeply_nested_maps() {
    let value = toon!({ "l1": { "l2": { "l3": { "l4": { "l5": "deepest value" } } } } });
    let text = encode(&value).unwrap();
    assert_eq!(
        text,
        "l1:\n  l2:\n    l3:\n      l4:\n        l5: deepest value"
    );
    let back = decode(&text).unwrap();
    let deepest = ["l1", "l2", "l3", "l4", "l5"]
        .iter()
        .try_fold(&back, |value, key| value.get(key));
    assert_eq!(deepest, Some(&Value::from("deepest value")));
}

#[test]
fn test_complex_nested_lists() {
    let value = toon!([["a", "b"], [["c", "d"], "e"], "f"]);
    let text = encode(&value).unwrap();
    assert_eq!(text, "- a, b\n-\n  - c, d\n  - e\n- f");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_unicode() {
    let value = toon!({
        "emoji": "🚀 launch 🎉",
        "chinese": "你好世界",
        "arabic": "مرحبا بالعالم",
        "russian": "Привет мир",
        "日本語": "キー"
    });
    let text = encode(&value).unwrap();
    assert!(text.contains("emoji: 🚀 launch 🎉"));
    assert!(text.contains("日本語: キー"));
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_json_interop() {
    // serde_json keeps object keys sorted
    let json = json!({
        "dims": { "h": 3.5, "w": 2 },
        "name": "Widget",
        "note": null,
        "tags": ["a", "b"]
    });
    let value = to_value(&json).unwrap();
    assert_eq!(
        value,
        toon!({
            "dims": { "h": 3.5, "w": 2 },
            "name": "Widget",
            "note": null,
            "tags": ["a", "b"]
        })
    );

    let text = encode(&value).unwrap();
    let back: serde_json::Value = from_str(&text).unwrap();
    assert_eq!(back, json);
}

#[test]
fn test_value_bridge() {
    let value = to_value(&alice()).unwrap();
    assert_eq!(value.get("id"), Some(&Value::Int(123)));
    assert_eq!(
        value.get("tags"),
        Some(&Value::List(vec![Value::from("admin"), Value::from("developer")]))
    );
    let user: User = from_value(value).unwrap();
    assert_eq!(user, alice());
}

#[test]
fn test_reader_and_writer() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &alice()).unwrap();

    let from_bytes: User = from_slice(&buffer).unwrap();
    assert_eq!(from_bytes, alice());

    let from_read: User = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(from_read, alice());
}

#[test]
fn test_indent_option() {
    let options = EncodeOptions::new().with_indent(4);
    let text = to_string_with_options(&alice(), &options).unwrap();
    assert_eq!(text, "id: 123\nname: Alice\nactive: true\ntags: admin, developer");

    let order = toon!({ "outer": { "inner": [[1], { "x": 1 }] } });
    let text = toon_codec::encode_with_options(&order, &options).unwrap();
    assert_eq!(
        text,
        "outer:\n    inner:\n        - 1,\n        -\n            x: 1"
    );
    assert_eq!(decode(&text).unwrap(), order);
}

#[test]
fn test_numeric_strings_feed_numeric_fields() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Config {
        port: u16,
        ratio: f32,
    }

    let config: Config = from_str("port: \"8080\"\nratio: 0.5").unwrap();
    assert_eq!(config, Config { port: 8080, ratio: 0.5 });

    let err = from_str::<Config>("port: http\nratio: 1").unwrap_err();
    assert_eq!(err.kind(), Some(toon_codec::ErrorKind::InvalidNumberLiteral));
}

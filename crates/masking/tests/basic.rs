#![allow(dead_code)]

use masking::{PeekInterface, Secret};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct Composite {
    secret_word: Secret<String>,
    not_secret: String,
}

#[test]
fn basic() {
    let composite = Composite {
        secret_word: Secret::new("hunter2".to_string()),
        not_secret: "not secret".to_string(),
    };

    // clone

    let composite2 = composite.clone();
    assert_eq!(composite, composite2);

    // format: the secret must never appear in Debug output

    let got = format!("{composite:?}");
    let exp =
        "Composite { secret_word: *** alloc::string::String ***, not_secret: \"not secret\" }";
    assert_eq!(got, exp);

    // serialize: the wire representation carries the exposed value

    let got = serde_json::to_string(&composite).unwrap();
    let exp = "{\"secret_word\":\"hunter2\",\"not_secret\":\"not secret\"}";
    assert_eq!(got, exp);

    // peek

    assert_eq!(composite.secret_word.peek(), "hunter2");
}

#[test]
fn maskable_headers() {
    use masking::{Mask, Maskable};

    let authorization: Maskable<String> = "Bearer token".to_string().into_masked();
    let accept: Maskable<String> = "application/json".into();

    assert_eq!(format!("{authorization:?}"), "*** alloc::string::String ***");
    assert_eq!(format!("{accept:?}"), "\"application/json\"");

    assert_eq!(authorization.into_inner(), "Bearer token");
    assert_eq!(accept.into_inner(), "application/json");
}

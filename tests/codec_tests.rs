//! Tests for persisting values through the codec.

use urlkit::{codec, Host, Pattern, PatternType, Url, UrlError, UrlPart, UrlPattern};

#[test]
fn test_values_round_trip() {
    let url = Url::parse("https://bob@example.com:8443/a%20b?x=1#top").unwrap();
    let host = Host::with_scheme("https", "Example.com", None).unwrap();
    let rule = UrlPattern::new(Some(UrlPart::Path), Pattern::new(PatternType::Regex, r"^/a"));

    let text = codec::encode(&url).unwrap();
    assert_eq!(codec::decode::<Url>(&text, "url", false).unwrap(), Some(url.clone()));

    let text = codec::encode(&host).unwrap();
    assert_eq!(codec::decode::<Host>(&text, "host", false).unwrap(), Some(host));

    let bytes = codec::encode_bytes(Some(&rule)).unwrap();
    let decoded: UrlPattern = codec::decode_bytes(&bytes, "rule", false).unwrap().unwrap();
    assert_eq!(decoded, rule);
    assert!(decoded.matches(&url).unwrap());
}

#[test]
fn test_null_marker() {
    let text = codec::encode_option::<Url>(None).unwrap();
    assert_eq!(text, codec::NULL);

    assert_eq!(codec::decode::<Url>(&text, "url", true).unwrap(), None);
    match codec::decode::<Url>(&text, "url", false) {
        Err(err @ UrlError::NullNotAllowed { .. }) => assert!(err.is_decode_error()),
        other => panic!("Expected NullNotAllowed, got {:?}", other),
    }
}

#[test]
fn test_mismatched_payloads() {
    let test_cases = vec![
        (r#""http://""#, "url"),
        (r#"{"hostname":"   "}"#, "host"),
        (r#"{"type":"FUZZY","expression":"x"}"#, "pattern"),
        ("[1,2", "rule"),
    ];

    for (payload, field) in test_cases {
        let err = match field {
            "url" => codec::decode::<Url>(payload, field, true).unwrap_err(),
            "host" => codec::decode::<Host>(payload, field, true).unwrap_err(),
            "pattern" => codec::decode::<Pattern>(payload, field, true).unwrap_err(),
            _ => codec::decode::<UrlPattern>(payload, field, true).unwrap_err(),
        };
        match err {
            UrlError::Decode { field: reported, .. } => assert_eq!(reported, field),
            other => panic!("Expected Decode error for {}, got {:?}", payload, other),
        }
    }
}

use rstest::rstest;
use shopdesk_api::config::parse_flag;

#[rstest]
#[case("true", Some(true))]
#[case(" YES ", Some(true))]
#[case("1", Some(true))]
#[case("off", Some(false))]
#[case("", Some(false))]
#[case("maybe", None)]
fn test_parse_flag(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_flag(raw), expected);
}

#![allow(missing_docs)]

use petstore_client::{ApiClient, DateFormat, parse_time_zone};
use rstest::rstest;
use tracing::info;

fn gmt_plus_10_client() -> anyhow::Result<(ApiClient, DateFormat)> {
    // without milliseconds, custom time zone
    let format = DateFormat::with_pattern("%Y-%m-%dT%H:%M:%S%:z")?
        .with_time_zone(parse_time_zone("GMT+10")?);
    let client = ApiClient::builder().date_format(format.clone()).build();
    Ok((client, format))
}

#[rstest]
#[case::utc_offset("2015-11-07T03:49:09.356+00:00")]
#[case::zulu("2015-11-07T03:49:09.356Z")]
#[case::east("2015-11-07T05:49:09.356+02:00")]
#[case::west("2015-11-07T02:49:09.356-01:00")]
fn test_default_date_format(#[case] input: &str) -> anyhow::Result<()> {
    let client = ApiClient::builder().build();

    let date = client.parse_date(input)?;
    info!(%input, %date, "parsed");

    assert_eq!(client.format_date(&date), "2015-11-07T03:49:09.356Z");
    Ok(())
}

#[rstest]
#[case::utc_offset("2015-11-07T03:49:09+00:00")]
#[case::zulu("2015-11-07T03:49:09Z")]
#[case::west("2015-11-07T00:49:09-03:00")]
#[case::same_zone("2015-11-07T13:49:09+10:00")]
fn test_custom_date_format(#[case] input: &str) -> anyhow::Result<()> {
    let (client, _) = gmt_plus_10_client()?;

    let date = client.parse_date(input)?;

    assert_eq!(client.format_date(&date), "2015-11-07T13:49:09+10:00");
    Ok(())
}

#[rstest]
#[case::date_time("%Y-%m-%dT%H:%M:%S", "2015-11-07T13:49:09", "2015-11-07T03:49:09+00:00")]
#[case::date_only("%Y-%m-%d", "2015-11-07", "2015-11-06T14:00:00+00:00")]
fn test_pattern_without_offset_round_trips(
    #[case] pattern: &str,
    #[case] formatted: &str,
    #[case] instant: &str,
) -> anyhow::Result<()> {
    let format = DateFormat::with_pattern(pattern)?.with_time_zone(parse_time_zone("GMT+10")?);
    let client = ApiClient::builder().date_format(format).build();

    let date = client.parse_date("2015-11-07T03:49:09Z")?;
    assert_eq!(client.format_date(&date), formatted);

    // read back in GMT+10
    let parsed = client.parse_date(formatted)?;
    assert_eq!(parsed.to_rfc3339(), instant);
    assert_eq!(client.format_date(&parsed), formatted);
    Ok(())
}

#[test]
fn test_modify_date_format_after_build() -> anyhow::Result<()> {
    let (client, format) = gmt_plus_10_client()?;
    let date = client.parse_date("2015-11-07T03:49:09Z")?;

    client.date_format().set_time_zone(parse_time_zone("GMT+11")?);

    assert_eq!(format.time_zone(), parse_time_zone("GMT+11")?);
    assert_eq!(client.format_date(&date), "2015-11-07T14:49:09+11:00");
    Ok(())
}

#[test]
fn test_invalid_date_is_reported() {
    let client = ApiClient::builder().build();

    let result = client.parse_date("07/11/2015");

    let error = result.expect_err("not an RFC 3339 date");
    assert!(error.to_string().starts_with("Invalid date '07/11/2015'"));
}

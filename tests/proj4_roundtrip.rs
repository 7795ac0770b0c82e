//! 使用真实 proj4rs 投影的端到端转换测试

use gk_convert::{
    convert, run_batch, BatchRow, ConvertError, ConvertRequest, Converter, Direction, ErrorKind,
    ZoneWidth, ZoningScheme,
};

const SCHEMES: [ZoningScheme; 4] = [
    ZoningScheme::new(ZoneWidth::Three, false),
    ZoningScheme::new(ZoneWidth::Three, true),
    ZoningScheme::new(ZoneWidth::Six, false),
    ZoningScheme::new(ZoneWidth::Six, true),
];

fn decimals(part: &str) -> usize {
    part.split('.').nth(1).map_or(0, str::len)
}

#[test]
fn beijing_three_degree_without_prefix() {
    let result = convert(
        &ConvertRequest::geographic(116.397428, 39.909230)
            .with_scheme(ZoningScheme::new(ZoneWidth::Three, false))
            .with_decimal_places(4),
    )
    .unwrap();

    // floor((116.397428 + 1.5) / 3) = 39
    assert_eq!(result.zone_number, 39);
    assert_eq!(result.central_meridian, 117.0);

    let p = result.as_projected().unwrap();
    assert!(p.x > 440_000.0 && p.x < 460_000.0, "easting {}", p.x);
    assert!(p.y > 4_410_000.0 && p.y < 4_430_000.0, "northing {}", p.y);

    let (a, b) = result.combined.split_once(", ").unwrap();
    assert_eq!(decimals(a), 4);
    assert_eq!(decimals(b), 4);
    assert_eq!(a.parse::<f64>().unwrap(), p.x);
    assert_eq!(b.parse::<f64>().unwrap(), p.y);
}

#[test]
fn prefixed_easting_starts_with_zone_number() {
    let plain = convert(
        &ConvertRequest::geographic(116.397428, 39.909230)
            .with_scheme(ZoningScheme::new(ZoneWidth::Three, false)),
    )
    .unwrap();
    let prefixed = convert(
        &ConvertRequest::geographic(116.397428, 39.909230)
            .with_scheme(ZoningScheme::new(ZoneWidth::Three, true)),
    )
    .unwrap();

    let plain = plain.as_projected().unwrap();
    let prefixed = prefixed.as_projected().unwrap();
    assert!((prefixed.x - plain.x - 39_000_000.0).abs() < 1e-3);
    assert!((prefixed.y - plain.y).abs() < 1e-3);
    assert!(prefixed.x.to_string().starts_with("39"));
}

#[test]
fn round_trip_reproduces_interior_points() {
    let points = [
        (116.397428, 39.909230),
        (121.473701, 31.230416),
        (113.264385, 23.129110),
        (87.617733, 43.792818),
        (102.712251, 25.040609),
        (126.642464, 45.756967),
    ];
    for scheme in SCHEMES {
        for (lon, lat) in points {
            let forward = convert(
                &ConvertRequest::geographic(lon, lat)
                    .with_scheme(scheme)
                    .with_decimal_places(4),
            )
            .unwrap();
            let p = forward.as_projected().unwrap();

            let back = convert(
                &ConvertRequest::projected(p.x, p.y)
                    .with_scheme(scheme)
                    .with_zone_number(forward.zone_number)
                    .with_decimal_places(6),
            )
            .unwrap();
            let g = back.as_geographic().unwrap();
            assert!((g.longitude - lon).abs() < 1e-5, "{scheme} {lon} -> {}", g.longitude);
            assert!((g.latitude - lat).abs() < 1e-5, "{scheme} {lat} -> {}", g.latitude);
            assert_eq!(back.zone_number, forward.zone_number);
        }
    }
}

#[test]
fn swapped_survey_axes_are_caught() {
    // 测量习惯的 (X=北, Y=东) 直接当作 (东, 北) 传入,结果落在覆盖范围之外
    let scheme = ZoningScheme::new(ZoneWidth::Three, false);
    let forward = convert(&ConvertRequest::geographic(116.397428, 39.909230).with_scheme(scheme))
        .unwrap();
    let (survey_x, survey_y) = forward.as_projected().unwrap().survey_xy();

    let err = convert(
        &ConvertRequest::projected(survey_x, survey_y)
            .with_scheme(scheme)
            .with_zone_number(39),
    )
    .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::ResultOutOfRange | ErrorKind::ProjectionFailure
    ));
}

#[test]
fn wrong_zone_for_prefixed_easting_is_rejected() {
    // 45 带东缘的点按 44 带反算,东坐标偏离中央子午线约 990km,经度超过 135°
    let scheme = ZoningScheme::new(ZoneWidth::Three, true);
    let forward = convert(&ConvertRequest::geographic(134.9, 40.0).with_scheme(scheme)).unwrap();
    assert_eq!(forward.zone_number, 45);
    let p = forward.as_projected().unwrap();

    let err = convert(
        &ConvertRequest::projected(p.x, p.y)
            .with_scheme(scheme)
            .with_zone_number(44),
    )
    .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::ResultOutOfRange | ErrorKind::ProjectionFailure
    ));
}

#[test]
fn latitude_60_is_out_of_range() {
    let err = convert(&ConvertRequest::geographic(116.0, 60.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn inverse_without_zone_number() {
    let err = convert(&ConvertRequest::projected(448_000.0, 4_419_000.0)).unwrap_err();
    assert!(matches!(err, ConvertError::MissingZoneNumber));
}

#[test]
fn identical_requests_give_identical_results() {
    let request = ConvertRequest::geographic(121.473701, 31.230416)
        .with_scheme(ZoningScheme::new(ZoneWidth::Six, true))
        .with_decimal_places(8);
    let a = convert(&request).unwrap();
    let b = convert(&request).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.combined.as_bytes(), b.combined.as_bytes());
}

#[test]
fn batch_with_one_bad_row() {
    let converter: Converter = Converter::default();
    let rows = vec![
        BatchRow::geographic(1, 116.397428, 39.909230).with_note("北京天安门"),
        BatchRow::geographic(2, 121.473701, 99.0).with_note("上海外滩"),
        BatchRow::geographic(3, 113.264385, 23.129110).with_note("广州塔"),
    ];
    let report = run_batch(
        &converter,
        &rows,
        Direction::GeographicToProjected,
        ZoningScheme::new(ZoneWidth::Three, false),
        4,
    )
    .report();

    let summary: Vec<(usize, bool)> = report
        .outcomes()
        .iter()
        .map(|o| (o.index(), o.is_success()))
        .collect();
    assert_eq!(summary, vec![(1, true), (2, false), (3, true)]);
    assert_eq!(report.outcomes()[1].note(), Some("上海外滩"));
    assert_eq!(
        report.outcomes()[1].error().unwrap().kind(),
        Some(ErrorKind::OutOfRange)
    );
}

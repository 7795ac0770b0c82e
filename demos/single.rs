// 单点转换示例:北京天安门经纬度正算,再用得到的带号反算回来
use gk_convert::{ConvertRequest, Converter, ZoneWidth, ZoningScheme};
use std::time::Instant;

const LONGITUDE: f64 = 116.397428;
const LATITUDE: f64 = 39.909230;

fn main() {
    println!("Example: gk_convert single point");

    // 初始化日志记录器
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let converter: Converter = Converter::default();

    for width in [ZoneWidth::Three, ZoneWidth::Six] {
        for embedded in [false, true] {
            let scheme = ZoningScheme::new(width, embedded);

            let t0 = Instant::now();
            let forward = converter
                .convert(&ConvertRequest::geographic(LONGITUDE, LATITUDE).with_scheme(scheme))
                .unwrap();
            let p = forward.as_projected().unwrap();
            println!(
                "{scheme}: 第 {} 带, 中央子午线 {}°, 东/北 = {} ({:.3}ms)",
                forward.zone_number,
                forward.central_meridian,
                forward.combined,
                t0.elapsed().as_micros() as f64 / 1000.0
            );

            let back = converter
                .convert(
                    &ConvertRequest::projected(p.x, p.y)
                        .with_scheme(scheme)
                        .with_zone_number(forward.zone_number)
                        .with_decimal_places(6),
                )
                .unwrap();
            println!("    反算经纬度 = {}", back.combined);
        }
    }

    // 纬度超出范围时返回带类别的错误
    match converter.convert(&ConvertRequest::geographic(LONGITUDE, 60.0)) {
        Ok(result) => println!("unexpected: {}", result.combined),
        Err(e) => println!("{}: {e}", e.kind()),
    }
}

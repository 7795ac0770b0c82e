//! 坐标转换模块
//!
//! 支持两个方向:
//!
//! - 经纬度 -> 国家2000高斯投影坐标:先校验纬度,再按经度确定分带,然后正算
//! - 国家2000高斯投影坐标 -> 经纬度:必须给出带号,反算后再次校验结果范围
//!
//! 结果按指定小数位数四舍五入(远离零),同时给出结构化数值与
//! `"a, b"` 形式的组合字符串。
//!
//! # 示例
//!
//! ```
//! use gk_convert::convert::{ConvertRequest, Converter};
//! use gk_convert::zone::{ZoneWidth, ZoningScheme};
//!
//! let converter: Converter = Converter::default();
//! let request = ConvertRequest::geographic(116.397428, 39.909230)
//!     .with_scheme(ZoningScheme::new(ZoneWidth::Three, false));
//! let result = converter.convert(&request).unwrap();
//! assert_eq!(result.zone_number, 39);
//! ```

use crate::projection::primatives::{
    GeographicPoint, ProjectedPoint, LATITUDE_RANGE, LONGITUDE_RANGE,
};
use crate::projection::{Proj4Backend, ProjectionBackend};
use crate::zone::{self, ZoningScheme};
use std::fmt;
use std::str::FromStr;
use tracing::*;

mod error;
mod parse;

pub use error::{Axis, ConvertError, ConvertResult, ErrorKind};
pub use parse::{parse_coordinate, parse_zone_number};

/// 默认小数位数
pub const DEFAULT_DECIMAL_PLACES: u8 = 4;
/// 允许的最小小数位数
pub const MIN_DECIMAL_PLACES: u8 = 1;
/// 允许的最大小数位数
pub const MAX_DECIMAL_PLACES: u8 = 8;

/// 转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// 经纬度 -> 投影坐标
    GeographicToProjected,
    /// 投影坐标 -> 经纬度
    ProjectedToGeographic,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::GeographicToProjected => write!(f, "WGS84->CGCS2000"),
            Direction::ProjectedToGeographic => write!(f, "CGCS2000->WGS84"),
        }
    }
}

/// 无法识别的转换方向
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "不支持的源类型: {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// 按源坐标类型解析:`"wgs84"` 为正算,`"cgcs2000"` 为反算
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" | "geographic" => Ok(Direction::GeographicToProjected),
            "cgcs2000" | "projected" => Ok(Direction::ProjectedToGeographic),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// 一次转换请求
///
/// `primary`/`secondary` 在正算时为 (经度, 纬度),反算时为 (东坐标, 北坐标)。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertRequest {
    pub direction: Direction,
    pub primary: f64,
    pub secondary: f64,
    pub scheme: ZoningScheme,
    pub zone_number: Option<u32>,
    pub decimal_places: u8,
}

impl ConvertRequest {
    pub fn new(direction: Direction, primary: f64, secondary: f64) -> Self {
        Self {
            direction,
            primary,
            secondary,
            scheme: ZoningScheme::default(),
            zone_number: None,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// 经纬度 -> 投影坐标
    pub fn geographic(longitude: f64, latitude: f64) -> Self {
        Self::new(Direction::GeographicToProjected, longitude, latitude)
    }

    /// 投影坐标 (东, 北) -> 经纬度
    pub fn projected(easting: f64, northing: f64) -> Self {
        Self::new(Direction::ProjectedToGeographic, easting, northing)
    }

    pub fn with_scheme(mut self, scheme: ZoningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_zone_number(mut self, zone_number: u32) -> Self {
        self.zone_number = Some(zone_number);
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u8) -> Self {
        self.decimal_places = decimal_places;
        self
    }
}

/// 转换后的点
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvertedPoint {
    Geographic(GeographicPoint),
    Projected(ProjectedPoint),
}

/// 转换结果
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionResult {
    pub point: ConvertedPoint,
    /// 使用的带号
    pub zone_number: u32,
    /// 中央子午线(度)
    pub central_meridian: f64,
    pub decimal_places: u8,
    /// `"a, b"` 形式的组合字符串,两侧都保留 `decimal_places` 位小数
    pub combined: String,
}

impl ConversionResult {
    pub fn as_projected(&self) -> Option<&ProjectedPoint> {
        match &self.point {
            ConvertedPoint::Projected(p) => Some(p),
            ConvertedPoint::Geographic(_) => None,
        }
    }

    pub fn as_geographic(&self) -> Option<&GeographicPoint> {
        match &self.point {
            ConvertedPoint::Geographic(p) => Some(p),
            ConvertedPoint::Projected(_) => None,
        }
    }
}

/// 按小数位数四舍五入(远离零)
pub fn round_to(value: f64, decimal_places: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(decimal_places));
    // 加 0.0 消除 -0.0
    (value * factor).round() / factor + 0.0
}

fn combine(a: f64, b: f64, decimal_places: u8) -> String {
    let prec = usize::from(decimal_places);
    format!("{a:.prec$}, {b:.prec$}")
}

fn require_finite(value: f64) -> ConvertResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConvertError::InvalidNumericInput(value.to_string()))
    }
}

/// 坐标转换器
///
/// 持有一个投影实现,本身无可变状态,可在多线程间共享。
#[derive(Debug, Clone, Default)]
pub struct Converter<B = Proj4Backend> {
    backend: B,
}

impl<B: ProjectionBackend> Converter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 执行一次转换
    ///
    /// # 错误
    /// * `InvalidPrecision` - 小数位数不在 1-8 之间
    /// * `InvalidNumericInput` - 坐标不是有限数
    /// * `OutOfRange` - 输入经纬度超出覆盖范围
    /// * `ZoneNotFound` - 带号不在分带表中
    /// * `MissingZoneNumber` - 反算时缺少带号
    /// * `ProjectionFailure` - 投影计算失败
    /// * `ResultOutOfRange` - 反算结果超出覆盖范围
    pub fn convert(&self, request: &ConvertRequest) -> ConvertResult<ConversionResult> {
        let d = request.decimal_places;
        if !(MIN_DECIMAL_PLACES..=MAX_DECIMAL_PLACES).contains(&d) {
            return Err(ConvertError::InvalidPrecision(d));
        }
        let primary = require_finite(request.primary)?;
        let secondary = require_finite(request.secondary)?;

        match request.direction {
            Direction::GeographicToProjected => {
                self.forward(primary, secondary, request.scheme, d)
            }
            Direction::ProjectedToGeographic => {
                let zone_number = request.zone_number.ok_or(ConvertError::MissingZoneNumber)?;
                self.inverse(primary, secondary, request.scheme, zone_number, d)
            }
        }
    }

    fn forward(
        &self,
        longitude: f64,
        latitude: f64,
        scheme: ZoningScheme,
        d: u8,
    ) -> ConvertResult<ConversionResult> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(ConvertError::OutOfRange {
                axis: Axis::Latitude,
                value: latitude,
            });
        }
        let entry = zone::resolve_by_longitude(longitude, scheme)?;

        let (x, y) = self
            .backend
            .forward(entry.projection_id, longitude, latitude)
            .map_err(|source| ConvertError::ProjectionFailure {
                projection_id: entry.projection_id,
                direction: Direction::GeographicToProjected,
                source,
            })?;
        let (x, y) = (round_to(x, d), round_to(y, d));
        debug!("({longitude}, {latitude}) -> ({x}, {y}) @ {scheme} 第 {} 带", entry.zone_number);

        Ok(ConversionResult {
            point: ConvertedPoint::Projected(entry.projected_point(x, y)),
            zone_number: entry.zone_number,
            central_meridian: entry.central_meridian,
            decimal_places: d,
            combined: combine(x, y, d),
        })
    }

    fn inverse(
        &self,
        easting: f64,
        northing: f64,
        scheme: ZoningScheme,
        zone_number: u32,
        d: u8,
    ) -> ConvertResult<ConversionResult> {
        let entry = zone::resolve_by_zone_number(zone_number, scheme)?;

        let (lon, lat) = self
            .backend
            .inverse(entry.projection_id, easting, northing)
            .map_err(|source| ConvertError::ProjectionFailure {
                projection_id: entry.projection_id,
                direction: Direction::ProjectedToGeographic,
                source,
            })?;
        let (lon, lat) = (round_to(lon, d), round_to(lat, d));

        if !LONGITUDE_RANGE.contains(&lon) {
            return Err(ConvertError::ResultOutOfRange {
                axis: Axis::Longitude,
                value: lon,
            });
        }
        if !LATITUDE_RANGE.contains(&lat) {
            return Err(ConvertError::ResultOutOfRange {
                axis: Axis::Latitude,
                value: lat,
            });
        }
        debug!("({easting}, {northing}) @ {scheme} 第 {zone_number} 带 -> ({lon}, {lat})");

        Ok(ConversionResult {
            point: ConvertedPoint::Geographic(GeographicPoint::new(lon, lat)),
            zone_number: entry.zone_number,
            central_meridian: entry.central_meridian,
            decimal_places: d,
            combined: combine(lon, lat, d),
        })
    }
}

/// 使用 proj4rs 执行一次转换
pub fn convert(request: &ConvertRequest) -> ConvertResult<ConversionResult> {
    Converter::new(Proj4Backend).convert(request)
}

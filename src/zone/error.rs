//! 分带解析错误模块
//!
//! - `LongitudeOutOfRange` - 经度超出国内覆盖范围
//! - `ZoneNotFound` - 选定的分带表中没有该带号
//! - `UnknownWidth` - 无法识别的分带宽度
use super::ZoningScheme;
use crate::projection::primatives::LONGITUDE_RANGE;
use std::fmt;

/// 分带解析过程中可能出现的错误
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneError {
    /// 经度超出范围 [72.0, 135.0]
    LongitudeOutOfRange(f64),

    /// 分带表中不存在该带号
    ///
    /// 对覆盖范围内的经度出现此错误说明分带表本身有缺陷;
    /// 对调用方显式给出的带号则说明带号不合法。
    ZoneNotFound {
        scheme: ZoningScheme,
        zone_number: u32,
    },

    /// 无法识别的分带宽度文本
    UnknownWidth(String),
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneError::LongitudeOutOfRange(lon) => write!(
                f,
                "经度超出范围({:.1}-{:.1}): {lon}",
                LONGITUDE_RANGE.min, LONGITUDE_RANGE.max
            ),
            ZoneError::ZoneNotFound {
                scheme,
                zone_number,
            } => write!(
                f,
                "未找到对应的分带信息(分带类型: {}°, 带号: {zone_number}, 带号启用: {})",
                u8::from(scheme.width),
                scheme.zone_number_embedded
            ),
            ZoneError::UnknownWidth(text) => write!(f, "无法识别的分带类型: {text:?}"),
        }
    }
}

impl std::error::Error for ZoneError {}

//! 坐标转换错误模块
//!
//! [`ConvertError`] 汇总了转换过程中所有可能的错误,
//! 分带错误与投影错误通过 `From` 转换而来。每个错误都有稳定的
//! [`ErrorKind`],调用方可以据此分支而无需解析错误文本。
use super::Direction;
use crate::projection::primatives::{LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::projection::{ProjectionError, ProjectionId};
use crate::zone::{ZoneError, ZoningScheme};
use std::fmt;

/// 转换操作的通用结果类型
pub type ConvertResult<T> = Result<T, ConvertError>;

/// 坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Longitude => write!(f, "经度"),
            Axis::Latitude => write!(f, "纬度"),
        }
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    ResultOutOfRange,
    ZoneNotFound,
    MissingZoneNumber,
    InvalidPrecision,
    InvalidNumericInput,
    ProjectionFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::ResultOutOfRange => "ResultOutOfRange",
            ErrorKind::ZoneNotFound => "ZoneNotFound",
            ErrorKind::MissingZoneNumber => "MissingZoneNumber",
            ErrorKind::InvalidPrecision => "InvalidPrecision",
            ErrorKind::InvalidNumericInput => "InvalidNumericInput",
            ErrorKind::ProjectionFailure => "ProjectionFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 坐标转换中可能出现的错误
#[derive(Debug)]
pub enum ConvertError {
    /// 输入坐标超出国内覆盖范围
    OutOfRange { axis: Axis, value: f64 },
    /// 反算结果超出覆盖范围,通常说明带号或分带方案与坐标不符
    ResultOutOfRange { axis: Axis, value: f64 },
    /// 分带表中不存在该带号
    ZoneNotFound {
        scheme: ZoningScheme,
        zone_number: u32,
    },
    /// 投影坐标反算经纬度时未给出带号
    MissingZoneNumber,
    /// 小数位数不在 1-8 之间
    InvalidPrecision(u8),
    /// 无法解析或非有限的数值输入
    InvalidNumericInput(String),
    /// 外部投影计算失败
    ProjectionFailure {
        projection_id: ProjectionId,
        direction: Direction,
        source: ProjectionError,
    },
}

impl ConvertError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::OutOfRange { .. } => ErrorKind::OutOfRange,
            ConvertError::ResultOutOfRange { .. } => ErrorKind::ResultOutOfRange,
            ConvertError::ZoneNotFound { .. } => ErrorKind::ZoneNotFound,
            ConvertError::MissingZoneNumber => ErrorKind::MissingZoneNumber,
            ConvertError::InvalidPrecision(_) => ErrorKind::InvalidPrecision,
            ConvertError::InvalidNumericInput(_) => ErrorKind::InvalidNumericInput,
            ConvertError::ProjectionFailure { .. } => ErrorKind::ProjectionFailure,
        }
    }
}

fn range_of(axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Longitude => (LONGITUDE_RANGE.min, LONGITUDE_RANGE.max),
        Axis::Latitude => (LATITUDE_RANGE.min, LATITUDE_RANGE.max),
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::OutOfRange { axis, value } => {
                let (min, max) = range_of(*axis);
                write!(f, "{axis}超出范围({min:.1}-{max:.1}): {value}")
            }
            ConvertError::ResultOutOfRange { axis, value } => {
                write!(f, "转换后的{axis}超出合理范围({value})")
            }
            ConvertError::ZoneNotFound {
                scheme,
                zone_number,
            } => write!(
                f,
                "{}",
                ZoneError::ZoneNotFound {
                    scheme: *scheme,
                    zone_number: *zone_number
                }
            ),
            ConvertError::MissingZoneNumber => {
                write!(f, "转换国家2000到经纬度时,必须指定带号")
            }
            ConvertError::InvalidPrecision(places) => write!(
                f,
                "小数位数必须在 {}-{} 之间: {places}",
                super::MIN_DECIMAL_PLACES,
                super::MAX_DECIMAL_PLACES
            ),
            ConvertError::InvalidNumericInput(text) => write!(f, "无效的数值输入: {text:?}"),
            ConvertError::ProjectionFailure {
                projection_id,
                direction,
                source,
            } => write!(f, "转换失败(EPSG:{projection_id}, {direction}): {source}"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::ProjectionFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 从分带错误转换,保持错误类别不变
impl From<ZoneError> for ConvertError {
    fn from(e: ZoneError) -> Self {
        match e {
            ZoneError::LongitudeOutOfRange(value) => ConvertError::OutOfRange {
                axis: Axis::Longitude,
                value,
            },
            ZoneError::ZoneNotFound {
                scheme,
                zone_number,
            } => ConvertError::ZoneNotFound {
                scheme,
                zone_number,
            },
            ZoneError::UnknownWidth(text) => ConvertError::InvalidNumericInput(text),
        }
    }
}

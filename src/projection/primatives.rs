//! 坐标转换中使用的基本数据类型
//!
//! 本模块定义了:
//!
//! - `Interval`: 闭区间,用于表达合法坐标范围
//! - `GeographicPoint`: 经纬度点(十进制度)
//! - `ProjectedPoint`: 高斯-克吕格投影平面点
//!
//! 以及国内坐标的合法覆盖范围常量。

use std::fmt;
use std::ops::Sub;

/// 合法经度范围(度)
pub const LONGITUDE_RANGE: Interval<f64> = Interval::new(72.0, 135.0);

/// 合法纬度范围(度)
pub const LATITUDE_RANGE: Interval<f64> = Interval::new(0.0, 54.0);

/// 表示一个闭区间 [min, max]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// 创建一个新的区间
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Interval<T> {
    /// 判断值是否落在闭区间内(两端包含)
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}

impl<T: Copy + Sub<Output = T>> Interval<T> {
    /// 计算区间的范围
    pub fn range(&self) -> T {
        self.max - self.min
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// 经纬度点,单位为十进制度
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeographicPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeographicPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// 经纬度是否都落在国内合法覆盖范围内
    pub fn is_within_coverage(&self) -> bool {
        LONGITUDE_RANGE.contains(&self.longitude) && LATITUDE_RANGE.contains(&self.latitude)
    }
}

/// 高斯-克吕格投影平面点
///
/// `x` 为东坐标(启用带号时带有带号前缀),`y` 为北坐标。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectedPoint {
    /// 东坐标(米)
    pub x: f64,
    /// 北坐标(米)
    pub y: f64,
    /// 投影带号
    pub zone_number: u32,
    /// 中央子午线(度)
    pub central_meridian: f64,
}

impl ProjectedPoint {
    /// 按测量习惯返回 (X, Y),即 (北坐标, 东坐标)
    pub fn survey_xy(&self) -> (f64, f64) {
        (self.y, self.x)
    }
}

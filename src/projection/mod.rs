//! 投影模块
//!
//! 本模块把真正的地图投影计算隔离在一个窄接口 [`ProjectionBackend`] 之后:
//!
//! - `forward`: 经纬度(度) -> (东坐标, 北坐标)
//! - `inverse`: (东坐标, 北坐标) -> 经纬度(度)
//!
//! 默认实现 [`Proj4Backend`] 基于 proj4rs。投影定义由分带表推导出
//! proj4 字符串,无需运行时 EPSG 数据库。
//!
//! 参数顺序始终是 (经度, 纬度) 与 (东, 北),不使用 EPSG 官方的
//! (纬度, 经度) / (北, 东) 轴序。

use crate::zone::{self, ZoneEntry, ZoningScheme};
use proj4rs::errors::Error as Proj4Error;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use std::fmt;
use tracing::*;

pub mod primatives;

#[cfg(test)]
pub(crate) mod stub;

/// 地理坐标系(WGS84 经纬度)的 proj4 定义
pub const GEOGRAPHIC_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// 投影标识,即 EPSG 编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionId(u16);

impl ProjectionId {
    pub const fn new(epsg: u16) -> Self {
        Self(epsg)
    }

    /// EPSG 编码
    pub const fn epsg(self) -> u16 {
        self.0
    }

    /// 由分带表推导该投影的 proj4 定义
    ///
    /// 不属于任何分带表的编码返回 `None`。
    pub fn proj_definition(self) -> Option<String> {
        let (scheme, entry) = zone::find_projection(self)?;
        Some(format!(
            "+proj=tmerc +lat_0=0 +lon_0={} +k=1 +x_0={} +y_0=0 +ellps=GRS80 +units=m +no_defs",
            entry.central_meridian,
            false_easting(scheme, &entry)
        ))
    }
}

impl fmt::Display for ProjectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 东伪偏移量(米)
///
/// 带带号时为 `带号 * 1_000_000 + 500_000`,否则为 `500_000`。
pub fn false_easting(scheme: ZoningScheme, entry: &ZoneEntry) -> f64 {
    if scheme.zone_number_embedded {
        f64::from(entry.zone_number) * 1_000_000.0 + 500_000.0
    } else {
        500_000.0
    }
}

/// 投影错误类型
#[derive(Debug)]
pub enum ProjectionError {
    /// 投影标识不在分带表中
    UnknownProjection(ProjectionId),
    /// Proj4 库错误
    Proj4Error(Proj4Error),
    /// 投影结果不是有限数
    NonFiniteResult((f64, f64)),
}

impl From<Proj4Error> for ProjectionError {
    fn from(e: Proj4Error) -> Self {
        ProjectionError::Proj4Error(e)
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::UnknownProjection(id) => write!(f, "未知的投影: EPSG:{id}"),
            ProjectionError::Proj4Error(e) => write!(f, "投影计算失败: {e:?}"),
            ProjectionError::NonFiniteResult((a, b)) => {
                write!(f, "投影结果无效: ({a}, {b})")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

/// 外部投影计算接口
///
/// 实现者必须是确定性的:相同输入总是得到相同输出。
pub trait ProjectionBackend {
    /// 经纬度(度) -> (东坐标, 北坐标)
    fn forward(
        &self,
        id: ProjectionId,
        longitude: f64,
        latitude: f64,
    ) -> Result<(f64, f64), ProjectionError>;

    /// (东坐标, 北坐标) -> (经度, 纬度)(度)
    fn inverse(
        &self,
        id: ProjectionId,
        easting: f64,
        northing: f64,
    ) -> Result<(f64, f64), ProjectionError>;
}

impl<B: ProjectionBackend + ?Sized> ProjectionBackend for &B {
    fn forward(&self, id: ProjectionId, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        (**self).forward(id, lon, lat)
    }

    fn inverse(&self, id: ProjectionId, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        (**self).inverse(id, x, y)
    }
}

/// 基于 proj4rs 的投影实现
///
/// 每次调用都重新构建投影对象,不做缓存。
#[derive(Debug, Clone, Copy, Default)]
pub struct Proj4Backend;

impl Proj4Backend {
    pub fn new() -> Self {
        Self
    }

    fn geographic() -> Result<Proj, ProjectionError> {
        Ok(Proj::from_proj_string(GEOGRAPHIC_DEFINITION)?)
    }

    fn projected(id: ProjectionId) -> Result<Proj, ProjectionError> {
        let definition = id
            .proj_definition()
            .ok_or(ProjectionError::UnknownProjection(id))?;
        Ok(Proj::from_proj_string(&definition)?)
    }
}

fn finite(point: (f64, f64)) -> Result<(f64, f64), ProjectionError> {
    if point.0.is_finite() && point.1.is_finite() {
        Ok(point)
    } else {
        Err(ProjectionError::NonFiniteResult(point))
    }
}

impl ProjectionBackend for Proj4Backend {
    fn forward(
        &self,
        id: ProjectionId,
        longitude: f64,
        latitude: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let from = Self::geographic()?;
        let to = Self::projected(id)?;

        // proj4rs 的地理坐标以弧度表示
        let mut point = (longitude.to_radians(), latitude.to_radians(), 0.0);
        transform(&from, &to, &mut point)?;
        trace!("EPSG:{id} 正算 ({longitude}, {latitude}) -> ({}, {})", point.0, point.1);

        finite((point.0, point.1))
    }

    fn inverse(
        &self,
        id: ProjectionId,
        easting: f64,
        northing: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let from = Self::projected(id)?;
        let to = Self::geographic()?;

        let mut point = (easting, northing, 0.0);
        transform(&from, &to, &mut point)?;
        let (lon, lat) = (point.0.to_degrees(), point.1.to_degrees());
        trace!("EPSG:{id} 反算 ({easting}, {northing}) -> ({lon}, {lat})");

        finite((lon, lat))
    }
}

//! 分带解析模块
//!
//! 根据经度或显式带号,结合分带方案(3°/6°,是否带带号),
//! 确定投影带号、中央子午线与对应的 EPSG 投影标识。
//!
//! 带号计算采用向下取整:
//!
//! - 3° 分带: `floor((经度 + 1.5) / 3)`
//! - 6° 分带: `floor(经度 / 6) + 1`
//!
//! 恰好落在分带边界上的经度归入编号较大的一带。
//!
//! # 示例
//!
//! ```
//! use gk_convert::zone::{resolve_by_longitude, ZoneWidth, ZoningScheme};
//!
//! let scheme = ZoningScheme::new(ZoneWidth::Three, false);
//! let entry = resolve_by_longitude(116.397428, scheme).unwrap();
//! assert_eq!(entry.zone_number, 39);
//! assert_eq!(entry.projection_id.epsg(), 4548);
//! ```

use crate::projection::primatives::{ProjectedPoint, LONGITUDE_RANGE};
use crate::projection::ProjectionId;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;
use std::str::FromStr;
use tracing::*;

mod error;
pub mod tables;

pub use error::ZoneError;

/// 分带宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ZoneWidth {
    /// 3° 分带
    Three = 3,
    /// 6° 分带
    Six = 6,
}

impl ZoneWidth {
    /// 计算经度所在的带号
    ///
    /// 不做范围检查,只给出公式的字面结果。
    pub fn zone_of(self, longitude: f64) -> u32 {
        let zone = match self {
            ZoneWidth::Three => ((longitude + 1.5) / 3.0).floor(),
            ZoneWidth::Six => (longitude / 6.0).floor() + 1.0,
        };
        zone as u32
    }
}

impl FromStr for ZoneWidth {
    type Err = ZoneError;

    /// 支持 `"3"`、`"6"`、`"3°"`、`"6度"`、`"3°分带"` 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .trim_end_matches("分带")
            .trim_end_matches('°')
            .trim_end_matches('度')
            .trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(|n| ZoneWidth::try_from(n).ok())
            .ok_or_else(|| ZoneError::UnknownWidth(s.to_string()))
    }
}

/// 分带方案:分带宽度 + 东坐标是否带带号前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoningScheme {
    pub width: ZoneWidth,
    pub zone_number_embedded: bool,
}

impl ZoningScheme {
    pub const fn new(width: ZoneWidth, zone_number_embedded: bool) -> Self {
        Self {
            width,
            zone_number_embedded,
        }
    }

    /// 该方案对应的分带表
    pub fn table(&self) -> &'static ZoneTable {
        match (self.width, self.zone_number_embedded) {
            (ZoneWidth::Three, false) => &tables::GK3_PLAIN,
            (ZoneWidth::Three, true) => &tables::GK3_PREFIXED,
            (ZoneWidth::Six, false) => &tables::GK6_PLAIN,
            (ZoneWidth::Six, true) => &tables::GK6_PREFIXED,
        }
    }
}

impl Default for ZoningScheme {
    fn default() -> Self {
        Self::new(ZoneWidth::Three, false)
    }
}

impl fmt::Display for ZoningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.zone_number_embedded {
            "带带号"
        } else {
            "不带带号"
        };
        write!(f, "{}°分带({prefix})", u8::from(self.width))
    }
}

/// 分带表中的一条记录
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneEntry {
    /// 带号
    pub zone_number: u32,
    /// 中央子午线(度)
    pub central_meridian: f64,
    /// 投影标识(EPSG)
    pub projection_id: ProjectionId,
}

impl ZoneEntry {
    /// 以本带参数构造投影平面点
    pub fn projected_point(&self, x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint {
            x,
            y,
            zone_number: self.zone_number,
            central_meridian: self.central_meridian,
        }
    }
}

/// 某一分带方案下的分带表,按带号升序排列
#[derive(Debug)]
pub struct ZoneTable {
    scheme: ZoningScheme,
    entries: &'static [ZoneEntry],
}

impl ZoneTable {
    /// 表所属的分带方案
    pub fn scheme(&self) -> ZoningScheme {
        self.scheme
    }

    /// 按带号查找
    pub fn get(&self, zone_number: u32) -> Option<&'static ZoneEntry> {
        self.entries
            .binary_search_by_key(&zone_number, |e| e.zone_number)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ZoneEntry> {
        self.entries.iter()
    }

    /// 表中全部带号
    pub fn zone_numbers(&self) -> impl Iterator<Item = u32> {
        self.entries.iter().map(|e| e.zone_number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 通过经度确定分带
///
/// # 错误
/// * `LongitudeOutOfRange` - 经度不在 [72.0, 135.0] 内
/// * `ZoneNotFound` - 计算出的带号不在分带表中
///   (例如 3° 分带下 [72.0, 73.5) 的经度得到 24 带)
pub fn resolve_by_longitude(longitude: f64, scheme: ZoningScheme) -> Result<ZoneEntry, ZoneError> {
    if !LONGITUDE_RANGE.contains(&longitude) {
        return Err(ZoneError::LongitudeOutOfRange(longitude));
    }
    let zone_number = scheme.width.zone_of(longitude);
    let entry = resolve_by_zone_number(zone_number, scheme)?;
    debug!(
        "经度 {longitude} 位于 {scheme} 第 {zone_number} 带, EPSG:{}",
        entry.projection_id
    );
    Ok(entry)
}

/// 通过带号确定分带
pub fn resolve_by_zone_number(
    zone_number: u32,
    scheme: ZoningScheme,
) -> Result<ZoneEntry, ZoneError> {
    scheme
        .table()
        .get(zone_number)
        .copied()
        .ok_or(ZoneError::ZoneNotFound {
            scheme,
            zone_number,
        })
}

/// 在全部分带表中反查投影标识所属的方案与记录
pub fn find_projection(id: ProjectionId) -> Option<(ZoningScheme, ZoneEntry)> {
    tables::ALL_TABLES.iter().find_map(|table| {
        table
            .iter()
            .find(|e| e.projection_id == id)
            .map(|e| (table.scheme(), *e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: ZoningScheme = ZoningScheme::new(ZoneWidth::Three, false);
    const THREE_PREFIXED: ZoningScheme = ZoningScheme::new(ZoneWidth::Three, true);
    const SIX: ZoningScheme = ZoningScheme::new(ZoneWidth::Six, false);
    const SIX_PREFIXED: ZoningScheme = ZoningScheme::new(ZoneWidth::Six, true);

    /// [72.0, 135.0) 以 0.01° 步长采样
    fn sample_longitudes() -> impl Iterator<Item = f64> {
        (7200..13500).map(|i| f64::from(i) / 100.0)
    }

    #[test]
    fn six_degree_zones_cover_13_to_23() {
        for lon in sample_longitudes() {
            let entry = resolve_by_longitude(lon, SIX).unwrap();
            assert!((13..=23).contains(&entry.zone_number), "{lon}");
        }
    }

    #[test]
    fn three_degree_zones_cover_25_to_45_above_73_5() {
        for lon in sample_longitudes() {
            let zone = ZoneWidth::Three.zone_of(lon);
            assert!((24..=45).contains(&zone), "{lon}");
            if lon >= 73.5 {
                let entry = resolve_by_longitude(lon, THREE).unwrap();
                assert!((25..=45).contains(&entry.zone_number), "{lon}");
            }
        }
    }

    #[test]
    fn three_degree_west_edge_computes_zone_24() {
        for lon in [72.0, 73.0, 73.49] {
            let err = resolve_by_longitude(lon, THREE).unwrap_err();
            assert_eq!(
                err,
                ZoneError::ZoneNotFound {
                    scheme: THREE,
                    zone_number: 24
                }
            );
        }
        assert_eq!(resolve_by_longitude(73.5, THREE).unwrap().zone_number, 25);
    }

    #[test]
    fn boundary_longitude_goes_to_higher_zone() {
        // floor((90 + 1.5) / 3) = floor(30.5) = 30
        assert_eq!(resolve_by_longitude(90.0, THREE).unwrap().zone_number, 30);
        // 91.5 正好在 30/31 带边界上
        assert_eq!(resolve_by_longitude(91.5, THREE).unwrap().zone_number, 31);
        assert_eq!(resolve_by_longitude(91.4999, THREE).unwrap().zone_number, 30);
        // 6° 分带边界 90.0: floor(15) + 1
        assert_eq!(resolve_by_longitude(90.0, SIX).unwrap().zone_number, 16);
        assert_eq!(resolve_by_longitude(89.9999, SIX).unwrap().zone_number, 15);
    }

    #[test]
    fn coverage_edges() {
        assert_eq!(resolve_by_longitude(72.0, SIX).unwrap().zone_number, 13);
        assert_eq!(resolve_by_longitude(135.0, SIX).unwrap().zone_number, 23);
        let east = resolve_by_longitude(135.0, THREE).unwrap();
        assert_eq!(east.zone_number, 45);
        assert_eq!(east.central_meridian, 135.0);
    }

    #[test]
    fn out_of_range_longitude() {
        for lon in [71.999, 135.001, -116.0, f64::NAN] {
            assert!(matches!(
                resolve_by_longitude(lon, THREE),
                Err(ZoneError::LongitudeOutOfRange(_))
            ));
        }
    }

    #[test]
    fn beijing_resolves_to_zone_39() {
        let entry = resolve_by_longitude(116.397428, THREE).unwrap();
        assert_eq!(entry.zone_number, 39);
        assert_eq!(entry.central_meridian, 117.0);
        assert_eq!(entry.projection_id.epsg(), 4548);

        let prefixed = resolve_by_longitude(116.397428, THREE_PREFIXED).unwrap();
        assert_eq!(prefixed.projection_id.epsg(), 4527);

        let six = resolve_by_longitude(116.397428, SIX_PREFIXED).unwrap();
        assert_eq!(six.zone_number, 20);
        assert_eq!(six.projection_id.epsg(), 4498);
    }

    #[test]
    fn resolve_by_zone_number_lookup() {
        let entry = resolve_by_zone_number(17, SIX).unwrap();
        assert_eq!(entry.central_meridian, 99.0);
        assert_eq!(entry.projection_id.epsg(), 4506);

        let err = resolve_by_zone_number(40, SIX).unwrap_err();
        assert_eq!(
            err,
            ZoneError::ZoneNotFound {
                scheme: SIX,
                zone_number: 40
            }
        );
        assert!(err.to_string().contains("带号: 40"));
    }

    #[test]
    fn width_parsing() {
        assert_eq!("3".parse::<ZoneWidth>().unwrap(), ZoneWidth::Three);
        assert_eq!("6°".parse::<ZoneWidth>().unwrap(), ZoneWidth::Six);
        assert_eq!(" 3°分带 ".parse::<ZoneWidth>().unwrap(), ZoneWidth::Three);
        assert_eq!("6度".parse::<ZoneWidth>().unwrap(), ZoneWidth::Six);
        assert!(matches!(
            "4".parse::<ZoneWidth>(),
            Err(ZoneError::UnknownWidth(_))
        ));
        assert_eq!(ZoneWidth::try_from(6u8).unwrap(), ZoneWidth::Six);
        assert!(ZoneWidth::try_from(5u8).is_err());
    }

    #[test]
    fn find_projection_reverse_lookup() {
        let (scheme, entry) = find_projection(ProjectionId::new(4527)).unwrap();
        assert_eq!(scheme, THREE_PREFIXED);
        assert_eq!(entry.zone_number, 39);
        assert!(find_projection(ProjectionId::new(4326)).is_none());
    }

    #[test]
    fn scheme_display() {
        assert_eq!(THREE.to_string(), "3°分带(不带带号)");
        assert_eq!(SIX_PREFIXED.to_string(), "6°分带(带带号)");
    }
}

//! CGCS2000 高斯-克吕格分带表
//!
//! 四张编译期常量表,分别对应 3°/6° 分带与是否在东坐标前加带号。
//! EPSG 编码取自 EPSG 官方登记:
//!
//! | 分带 | 带号前缀 | 带号    | EPSG        |
//! |------|----------|---------|-------------|
//! | 3°   | 无       | 25..=45 | 4534..=4554 |
//! | 3°   | 有       | 25..=45 | 4513..=4533 |
//! | 6°   | 无       | 13..=23 | 4502..=4512 |
//! | 6°   | 有       | 13..=23 | 4491..=4501 |

use super::{ZoneEntry, ZoneTable, ZoneWidth, ZoningScheme};
use crate::projection::ProjectionId;

const fn entry(zone_number: u32, central_meridian: f64, epsg: u16) -> ZoneEntry {
    ZoneEntry {
        zone_number,
        central_meridian,
        projection_id: ProjectionId::new(epsg),
    }
}

/// 3° 分带,不带带号
pub static GK3_PLAIN: ZoneTable = ZoneTable {
    scheme: ZoningScheme::new(ZoneWidth::Three, false),
    entries: &[
        entry(25, 75.0, 4534),
        entry(26, 78.0, 4535),
        entry(27, 81.0, 4536),
        entry(28, 84.0, 4537),
        entry(29, 87.0, 4538),
        entry(30, 90.0, 4539),
        entry(31, 93.0, 4540),
        entry(32, 96.0, 4541),
        entry(33, 99.0, 4542),
        entry(34, 102.0, 4543),
        entry(35, 105.0, 4544),
        entry(36, 108.0, 4545),
        entry(37, 111.0, 4546),
        entry(38, 114.0, 4547),
        entry(39, 117.0, 4548),
        entry(40, 120.0, 4549),
        entry(41, 123.0, 4550),
        entry(42, 126.0, 4551),
        entry(43, 129.0, 4552),
        entry(44, 132.0, 4553),
        entry(45, 135.0, 4554),
    ],
};

/// 3° 分带,东坐标带带号
pub static GK3_PREFIXED: ZoneTable = ZoneTable {
    scheme: ZoningScheme::new(ZoneWidth::Three, true),
    entries: &[
        entry(25, 75.0, 4513),
        entry(26, 78.0, 4514),
        entry(27, 81.0, 4515),
        entry(28, 84.0, 4516),
        entry(29, 87.0, 4517),
        entry(30, 90.0, 4518),
        entry(31, 93.0, 4519),
        entry(32, 96.0, 4520),
        entry(33, 99.0, 4521),
        entry(34, 102.0, 4522),
        entry(35, 105.0, 4523),
        entry(36, 108.0, 4524),
        entry(37, 111.0, 4525),
        entry(38, 114.0, 4526),
        entry(39, 117.0, 4527),
        entry(40, 120.0, 4528),
        entry(41, 123.0, 4529),
        entry(42, 126.0, 4530),
        entry(43, 129.0, 4531),
        entry(44, 132.0, 4532),
        entry(45, 135.0, 4533),
    ],
};

/// 6° 分带,不带带号
pub static GK6_PLAIN: ZoneTable = ZoneTable {
    scheme: ZoningScheme::new(ZoneWidth::Six, false),
    entries: &[
        entry(13, 75.0, 4502),
        entry(14, 81.0, 4503),
        entry(15, 87.0, 4504),
        entry(16, 93.0, 4505),
        entry(17, 99.0, 4506),
        entry(18, 105.0, 4507),
        entry(19, 111.0, 4508),
        entry(20, 117.0, 4509),
        entry(21, 123.0, 4510),
        entry(22, 129.0, 4511),
        entry(23, 135.0, 4512),
    ],
};

/// 6° 分带,东坐标带带号
pub static GK6_PREFIXED: ZoneTable = ZoneTable {
    scheme: ZoningScheme::new(ZoneWidth::Six, true),
    entries: &[
        entry(13, 75.0, 4491),
        entry(14, 81.0, 4492),
        entry(15, 87.0, 4493),
        entry(16, 93.0, 4494),
        entry(17, 99.0, 4495),
        entry(18, 105.0, 4496),
        entry(19, 111.0, 4497),
        entry(20, 117.0, 4498),
        entry(21, 123.0, 4499),
        entry(22, 129.0, 4500),
        entry(23, 135.0, 4501),
    ],
};

/// 全部分带表
pub static ALL_TABLES: [&ZoneTable; 4] = [&GK3_PLAIN, &GK3_PREFIXED, &GK6_PLAIN, &GK6_PREFIXED];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zone_numbers_unique_and_meridians_increasing() {
        for table in ALL_TABLES {
            let zones: HashSet<u32> = table.iter().map(|e| e.zone_number).collect();
            assert_eq!(zones.len(), table.len());
            for pair in table.entries.windows(2) {
                assert!(pair[0].zone_number < pair[1].zone_number);
                assert!(pair[0].central_meridian < pair[1].central_meridian);
            }
        }
    }

    #[test]
    fn central_meridians_follow_zone_width() {
        for entry in GK3_PLAIN.iter().chain(GK3_PREFIXED.iter()) {
            assert_eq!(entry.central_meridian, f64::from(entry.zone_number * 3));
        }
        for entry in GK6_PLAIN.iter().chain(GK6_PREFIXED.iter()) {
            assert_eq!(entry.central_meridian, f64::from(entry.zone_number * 6 - 3));
        }
    }

    #[test]
    fn projection_ids_unique_across_tables() {
        let ids: HashSet<u16> = ALL_TABLES
            .iter()
            .flat_map(|t| t.iter())
            .map(|e| e.projection_id.epsg())
            .collect();
        assert_eq!(ids.len(), 21 * 2 + 11 * 2);
    }

    #[test]
    fn table_scheme_matches_selector() {
        for table in ALL_TABLES {
            assert!(std::ptr::eq(table.scheme().table(), table));
        }
    }
}

//! 国家2000(CGCS2000)高斯-克吕格投影坐标与经纬度互转
//!
//! 支持 3° 与 6° 分带,以及东坐标是否带带号前缀的两种写法,
//! 可转换单点,也可对表格数据逐行批量转换。
//!
//! # 主要功能
//! - 按经度或带号确定投影带与 EPSG 编码
//! - 经纬度 -> 高斯投影坐标(正算)
//! - 高斯投影坐标 -> 经纬度(反算,需要带号)
//! - 结果范围校验与统一的错误类别
//! - 逐行隔离失败的批量转换
//!
//! 投影计算本身委托给 proj4rs,通过 [`ProjectionBackend`] 接口隔离。
//!
//! # 示例
//! ```rust
//! use gk_convert::{ConvertRequest, Converter, ZoneWidth, ZoningScheme};
//!
//! let converter: Converter = Converter::default();
//! let request = ConvertRequest::geographic(116.397428, 39.909230)
//!     .with_scheme(ZoningScheme::new(ZoneWidth::Three, true))
//!     .with_decimal_places(3);
//! let result = converter.convert(&request)?;
//!
//! println!("带号: {}", result.zone_number);
//! println!("坐标: {}", result.combined);
//! # Ok::<(), gk_convert::ConvertError>(())
//! ```

// 导出主要模块
pub mod batch; // 批量转换
pub mod convert; // 单点转换
pub mod projection; // 投影接口与 proj4rs 实现
pub mod zone; // 分带解析

// 重新导出常用类型
pub use batch::{run_batch, BatchOutcome, BatchReport, BatchRow, BatchRun, RowError};
pub use convert::{
    convert, ConversionResult, ConvertError, ConvertRequest, ConvertResult, ConvertedPoint,
    Converter, Direction, ErrorKind, DEFAULT_DECIMAL_PLACES,
};
pub use projection::primatives::{GeographicPoint, ProjectedPoint};
pub use projection::{Proj4Backend, ProjectionBackend, ProjectionError, ProjectionId};
pub use zone::{
    resolve_by_longitude, resolve_by_zone_number, ZoneEntry, ZoneError, ZoneWidth, ZoningScheme,
};

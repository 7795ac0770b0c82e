//! 单元格文本到数值的最终校验
//!
//! 表格读取层通常已经把单元格解析成数值;无法解析的文本交给这里,
//! 统一报告为 `InvalidNumericInput`。

use super::{ConvertError, ConvertResult};

/// 解析坐标值,允许首尾空白,拒绝非有限数
pub fn parse_coordinate(text: &str) -> ConvertResult<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConvertError::InvalidNumericInput(text.to_string()))
}

/// 解析带号
///
/// 表格中的整数列常被读成浮点,因此接受 `"39.0"` 这类整值小数。
pub fn parse_zone_number(text: &str) -> ConvertResult<u32> {
    let trimmed = text.trim();
    if let Ok(zone) = trimmed.parse::<u32>() {
        return Ok(zone);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        _ => Err(ConvertError::InvalidNumericInput(text.to_string())),
    }
}

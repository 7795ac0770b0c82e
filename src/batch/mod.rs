//! 批量转换模块
//!
//! 对调用方读入的表格行逐行调用 [`Converter`],每行的失败被隔离为
//! 一条失败记录,不会中断后续行的处理。
//!
//! [`run_batch`] 只构造一个惰性的 [`BatchRun`],真正的转换在迭代时发生;
//! 每次调用 [`BatchRun::iter`] 都从第 1 行重新开始。

use crate::convert::{
    parse_coordinate, parse_zone_number, ConversionResult, ConvertError, ConvertRequest,
    ConvertResult, Converter, Direction, ErrorKind,
};
use crate::projection::ProjectionBackend;
use crate::zone::ZoningScheme;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::*;

#[cfg(feature = "parallel")]
mod parallel;

/// 默认预览行数
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// 调用方读入的一行原始数据
///
/// 所有字段都保留单元格原文,便于失败时原样回显。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchRow {
    /// 从 1 开始的行号
    pub index: usize,
    /// 经度或东坐标
    pub primary: String,
    /// 纬度或北坐标
    pub secondary: String,
    /// 带号(反算时需要)
    pub zone_number: Option<String>,
    /// 备注,原样透传
    pub note: Option<String>,
}

impl BatchRow {
    pub fn new(index: usize, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            index,
            primary: primary.into(),
            secondary: secondary.into(),
            zone_number: None,
            note: None,
        }
    }

    /// 由已解析的经纬度构造
    pub fn geographic(index: usize, longitude: f64, latitude: f64) -> Self {
        Self::new(index, longitude.to_string(), latitude.to_string())
    }

    /// 由已解析的 (东, 北) 与带号构造
    pub fn projected(index: usize, easting: f64, northing: f64, zone_number: u32) -> Self {
        Self::new(index, easting.to_string(), northing.to_string())
            .with_zone_number(zone_number.to_string())
    }

    pub fn with_zone_number(mut self, zone_number: impl Into<String>) -> Self {
        self.zone_number = Some(zone_number.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn to_request(&self, settings: &BatchSettings) -> ConvertResult<ConvertRequest> {
        let primary = parse_coordinate(&self.primary)?;
        let secondary = parse_coordinate(&self.secondary)?;
        let zone_number = self
            .zone_number
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_zone_number)
            .transpose()?;

        let mut request = ConvertRequest::new(settings.direction, primary, secondary)
            .with_scheme(settings.scheme)
            .with_decimal_places(settings.decimal_places);
        request.zone_number = zone_number;
        Ok(request)
    }
}

/// 单行失败原因
#[derive(Debug)]
pub enum RowError {
    /// 转换返回的错误
    Convert(ConvertError),
    /// 转换过程中发生 panic,包含 panic 信息
    Panicked(String),
}

impl RowError {
    /// 错误类别,panic 没有对应类别
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            RowError::Convert(e) => Some(e.kind()),
            RowError::Panicked(_) => None,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::Convert(e) => write!(f, "{e}"),
            RowError::Panicked(msg) => write!(f, "转换失败: {msg}"),
        }
    }
}

impl std::error::Error for RowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RowError::Convert(e) => Some(e),
            RowError::Panicked(_) => None,
        }
    }
}

/// 单行转换结果
#[derive(Debug)]
pub enum BatchOutcome {
    Success {
        index: usize,
        note: Option<String>,
        result: ConversionResult,
    },
    Failure {
        /// 原始输入,行号与备注也在其中
        input: BatchRow,
        error: RowError,
    },
}

impl BatchOutcome {
    /// 从 1 开始的行号
    pub fn index(&self) -> usize {
        match self {
            BatchOutcome::Success { index, .. } => *index,
            BatchOutcome::Failure { input, .. } => input.index,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            BatchOutcome::Success { note, .. } => note.as_deref(),
            BatchOutcome::Failure { input, .. } => input.note.as_deref(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        match self {
            BatchOutcome::Success { result, .. } => Some(result),
            BatchOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RowError> {
        match self {
            BatchOutcome::Success { .. } => None,
            BatchOutcome::Failure { error, .. } => Some(error),
        }
    }
}

/// 整批转换的参数
#[derive(Debug, Clone, Copy, PartialEq)]
struct BatchSettings {
    direction: Direction,
    scheme: ZoningScheme,
    decimal_places: u8,
}

/// 惰性、可重复迭代的一次批量转换
#[derive(Debug)]
pub struct BatchRun<'a, B> {
    converter: &'a Converter<B>,
    rows: &'a [BatchRow],
    settings: BatchSettings,
}

/// 构造一次批量转换,此时不做任何转换
pub fn run_batch<'a, B: ProjectionBackend>(
    converter: &'a Converter<B>,
    rows: &'a [BatchRow],
    direction: Direction,
    scheme: ZoningScheme,
    decimal_places: u8,
) -> BatchRun<'a, B> {
    BatchRun {
        converter,
        rows,
        settings: BatchSettings {
            direction,
            scheme,
            decimal_places,
        },
    }
}

impl<'a, B: ProjectionBackend> BatchRun<'a, B> {
    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 从第一行开始的新迭代
    pub fn iter(&self) -> BatchIter<'a, B> {
        BatchIter {
            converter: self.converter,
            rows: self.rows.iter(),
            settings: self.settings,
        }
    }

    /// 顺序执行全部行并汇总
    pub fn report(&self) -> BatchReport {
        BatchReport::new(self.iter().collect())
    }
}

impl<'a, B: ProjectionBackend> IntoIterator for &BatchRun<'a, B> {
    type Item = BatchOutcome;
    type IntoIter = BatchIter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// [`BatchRun`] 的迭代器,每次 `next` 转换一行
#[derive(Debug)]
pub struct BatchIter<'a, B> {
    converter: &'a Converter<B>,
    rows: std::slice::Iter<'a, BatchRow>,
    settings: BatchSettings,
}

impl<B: ProjectionBackend> Iterator for BatchIter<'_, B> {
    type Item = BatchOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(convert_row(self.converter, &self.settings, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<B: ProjectionBackend> ExactSizeIterator for BatchIter<'_, B> {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知错误".to_string()
    }
}

/// 转换单行,任何错误或 panic 都转为失败记录
fn convert_row<B: ProjectionBackend>(
    converter: &Converter<B>,
    settings: &BatchSettings,
    row: &BatchRow,
) -> BatchOutcome {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> ConvertResult<ConversionResult> {
        let request = row.to_request(settings)?;
        converter.convert(&request)
    }));

    let error = match outcome {
        Ok(Ok(result)) => {
            return BatchOutcome::Success {
                index: row.index,
                note: row.note.clone(),
                result,
            }
        }
        Ok(Err(e)) => RowError::Convert(e),
        Err(payload) => RowError::Panicked(panic_message(payload.as_ref())),
    };
    warn!("第 {} 行转换失败: {error}", row.index);
    BatchOutcome::Failure {
        input: row.clone(),
        error,
    }
}

/// 批量转换汇总,按行号顺序保存全部结果
#[derive(Debug)]
pub struct BatchReport {
    outcomes: Vec<BatchOutcome>,
    succeeded: usize,
}

impl BatchReport {
    fn new(outcomes: Vec<BatchOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let report = Self {
            outcomes,
            succeeded,
        };
        info!(
            "批量转换完成: 共 {} 行, 成功 {}, 失败 {}",
            report.total(),
            report.succeeded(),
            report.failed()
        );
        report
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded
    }

    pub fn outcomes(&self) -> &[BatchOutcome] {
        &self.outcomes
    }

    /// 前 `n` 行结果,供页面预览
    pub fn preview(&self, n: usize) -> &[BatchOutcome] {
        &self.outcomes[..n.min(self.outcomes.len())]
    }

    pub fn successes(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn into_outcomes(self) -> Vec<BatchOutcome> {
        self.outcomes
    }
}

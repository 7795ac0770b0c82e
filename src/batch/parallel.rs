//! 基于 rayon 的并行批量转换
//!
//! 各行互不依赖,可以并行转换;汇总结果按原始行顺序排列,而不是完成顺序。

use super::{convert_row, BatchOutcome, BatchReport, BatchRun};
use crate::projection::ProjectionBackend;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

impl<B: ProjectionBackend + Sync> BatchRun<'_, B> {
    /// 并行执行全部行并汇总
    pub fn report_parallel(&self) -> BatchReport {
        let mut outcomes: Vec<(usize, BatchOutcome)> = self
            .rows
            .par_iter()
            .enumerate()
            .map(|(position, row)| (position, convert_row(self.converter, &self.settings, row)))
            .collect();
        outcomes.sort_by_key(|(position, _)| *position);
        BatchReport::new(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }
}

//! 测试用的确定性投影实现
//!
//! 线性近似:东坐标 = 伪偏移 + (经度 - 中央子午线) * 100km,
//! 北坐标 = 纬度 * 110km。只用于验证分带与校验逻辑。

use super::{false_easting, ProjectionBackend, ProjectionError, ProjectionId};
use crate::zone;
use std::sync::atomic::{AtomicUsize, Ordering};

const METERS_PER_DEGREE_X: f64 = 100_000.0;
const METERS_PER_DEGREE_Y: f64 = 110_000.0;

#[derive(Debug, Default)]
pub(crate) struct StubBackend {
    calls: AtomicUsize,
    /// 纬度等于该值时正算直接 panic
    panic_at_latitude: Option<f64>,
    /// 所有调用都返回错误
    always_fail: bool,
}

impl StubBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn panicking_at_latitude(latitude: f64) -> Self {
        Self {
            panic_at_latitude: Some(latitude),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn zone_params(&self, id: ProjectionId) -> Result<(f64, f64), ProjectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.always_fail {
            return Err(ProjectionError::NonFiniteResult((f64::NAN, f64::NAN)));
        }
        let (scheme, entry) =
            zone::find_projection(id).ok_or(ProjectionError::UnknownProjection(id))?;
        Ok((entry.central_meridian, false_easting(scheme, &entry)))
    }
}

impl ProjectionBackend for StubBackend {
    fn forward(
        &self,
        id: ProjectionId,
        longitude: f64,
        latitude: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let (cm, fe) = self.zone_params(id)?;
        if self.panic_at_latitude == Some(latitude) {
            panic!("stub backend asked to panic at latitude {latitude}");
        }
        Ok((
            fe + (longitude - cm) * METERS_PER_DEGREE_X,
            latitude * METERS_PER_DEGREE_Y,
        ))
    }

    fn inverse(
        &self,
        id: ProjectionId,
        easting: f64,
        northing: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        let (cm, fe) = self.zone_params(id)?;
        Ok((
            cm + (easting - fe) / METERS_PER_DEGREE_X,
            northing / METERS_PER_DEGREE_Y,
        ))
    }
}

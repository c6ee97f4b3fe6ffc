/// Engine configuration - timing constants for holds and snapshots
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HOLD_TTL_SECS | 300 | 桌台锁定(hold)有效期(秒) |
/// | WALK_IN_BUFFER_MIN | 30 | walk-in 缓冲窗口(分钟) |
/// | DEFAULT_DURATION_MIN | 90 | 默认用餐时长(分钟) |
///
/// The frontend-implied minute values are defaults only; deployments tune
/// them per venue.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long an acquired hold stays valid without re-acquiring
    pub hold_ttl_secs: u64,
    /// A table with a reserved booking starting within this window
    /// is not offered for walk-ins
    pub walk_in_buffer_min: i64,
    /// Seating duration assumed when none is given (waitlist seating)
    pub default_duration_min: i64,
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            hold_ttl_secs: std::env::var("HOLD_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            walk_in_buffer_min: std::env::var("WALK_IN_BUFFER_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            default_duration_min: std::env::var("DEFAULT_DURATION_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(90),
        }
    }

    pub fn hold_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.hold_ttl_secs as i64)
    }

    pub fn walk_in_buffer(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.walk_in_buffer_min)
    }

    pub fn default_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.default_duration_min)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hold_ttl_secs: 300,
            walk_in_buffer_min: 30,
            default_duration_min: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.hold_ttl(), chrono::Duration::seconds(300));
        assert_eq!(config.walk_in_buffer(), chrono::Duration::minutes(30));
        assert_eq!(config.default_duration(), chrono::Duration::minutes(90));
    }
}

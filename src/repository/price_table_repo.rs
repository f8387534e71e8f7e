// ==========================================
// 住宿报价引擎 - 价格表仓储（内存）
// ==========================================
// 红线: 只能整体替换快照,读者看到的要么是旧表要么是新表
// ==========================================
// 职责: 持有当前价格表快照,提供读取与原子替换
// 存储: RwLock<Arc<PriceTable>>,读者克隆 Arc 后立即释放锁
// ==========================================

use crate::domain::price::{PriceRecord, PriceTable};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug)]
pub struct PriceTableRepository {
    current: RwLock<Arc<PriceTable>>,
}

impl PriceTableRepository {
    /// 创建仓储（初始为 version 0 的空表）
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(PriceTable::empty())),
        }
    }

    /// 当前快照
    pub fn snapshot(&self) -> Arc<PriceTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// 当前版本号
    pub fn version(&self) -> u64 {
        self.snapshot().version()
    }

    /// 用新记录整体替换快照,返回新快照
    ///
    /// 版本号在写锁内递增,并发替换不会得到相同版本
    pub fn replace(&self, records: Vec<PriceRecord>, batch_id: String) -> Arc<PriceTable> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);

        let version = guard.version() + 1;
        let table = Arc::new(PriceTable::from_records(version, Some(batch_id), records));
        *guard = Arc::clone(&table);

        debug!(version, records = table.len(), "价格表快照已替换");
        table
    }
}

impl Default for PriceTableRepository {
    fn default() -> Self {
        Self::new()
    }
}

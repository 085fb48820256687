//! Port and container name allocation
//!
//! Every fixture gets a fresh container name and fresh host ports from one
//! atomic counter, so concurrent fixtures never collide.

use std::sync::atomic::{AtomicU16, Ordering};

use fwt_domain::error::{Error, Result};

/// Resources reserved for one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSlot {
    pub index: u16,
    pub container_name: String,
    pub app_port: u16,
    pub control_port: Option<u16>,
}

#[derive(Debug)]
pub struct FixtureAllocator {
    next: AtomicU16,
    start_port: u16,
    control_start_port: Option<u16>,
}

impl FixtureAllocator {
    /// `control_start_port` is set when fixtures expose a control server
    pub fn new(start_port: u16, control_start_port: Option<u16>) -> Self {
        Self {
            next: AtomicU16::new(0),
            start_port,
            control_start_port,
        }
    }

    pub fn allocate(&self, test_id: &str) -> Result<FixtureSlot> {
        let index = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| Error::configuration("Fixture counter exhausted"))?;
        let app_port = offset_port(self.start_port, index)?;
        let control_port = self
            .control_start_port
            .map(|start| offset_port(start, index))
            .transpose()?;
        Ok(FixtureSlot {
            index,
            container_name: format!("{test_id}-{index}"),
            app_port,
            control_port,
        })
    }

    /// Number of slots handed out so far
    pub fn allocated(&self) -> u16 {
        self.next.load(Ordering::SeqCst)
    }
}

fn offset_port(start: u16, index: u16) -> Result<u16> {
    start
        .checked_add(index)
        .ok_or_else(|| Error::configuration(format!("Port range exhausted after {start}")))
}

//! Observable bus signals.
//!
//! The core exposes the state of the address and data buses after every
//! full clock cycle, together with the R/W pin and a marker for cycles
//! whose data the processor throws away (dummy reads, stale stack bytes).
//! A visualizing host renders these directly.

/// Bus signals as they stand at the end of a clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BusState {
    /// Contents of the 16-bit address bus.
    pub addr: u16,
    /// Contents of the 8-bit data bus.
    pub data: u8,
    /// State of the R/W pin; `true` means the cycle was a read.
    pub rw: bool,
    /// Set when the data on the bus is known to be discarded this cycle.
    pub discarded: bool,
    /// Address of the most recent read cycle, `None` until the first read.
    pub last_read: Option<u16>,
    /// Address of the most recent write cycle, `None` until the first write.
    pub last_write: Option<u16>,
}

impl BusState {
    /// Folds the cycle that just finished into the last-access trackers.
    pub(crate) fn record_access(&mut self) {
        if self.rw {
            self.last_read = Some(self.addr);
        } else {
            self.last_write = Some(self.addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_reads_and_writes_separately() {
        let mut bus = BusState {
            addr: 0x1234,
            rw: true,
            ..BusState::default()
        };
        bus.record_access();
        assert_eq!(bus.last_read, Some(0x1234));
        assert_eq!(bus.last_write, None);

        bus.addr = 0x01FF;
        bus.rw = false;
        bus.record_access();
        assert_eq!(bus.last_read, Some(0x1234));
        assert_eq!(bus.last_write, Some(0x01FF));
    }
}

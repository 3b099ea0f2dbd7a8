//! The producer/consumer channel surface
//!
//! [`SampleChannel`] ties one [`SharedSegment`] holding a [`SampleRecord`]
//! to the two role locks. Whichever process starts first constructs with
//! [`SampleChannel::create`] and becomes the creator; the other side
//! attaches. Every access method brackets the record with its role's
//! lock: acquire, touch the record, release immediately — no transaction
//! spans more than one call.

use tracing::info;

use pulse::consts::SAMPLE_COUNT;
use pulse::record::SampleRecord;

use crate::error::ChannelResult;
use crate::lock::{Role, RoleLock};
use crate::segment::SharedSegment;

/// One cross-process sample channel: a mapped record plus both role locks.
pub struct SampleChannel {
    segment: SharedSegment<SampleRecord>,
    producer_lock: RoleLock,
    consumer_lock: RoleLock,
}

impl SampleChannel {
    /// Create the channel as the creator process.
    ///
    /// Allocates the zero-initialized segment and both lock names; the
    /// creator's teardown removes all three from the system.
    pub fn create(name: &str) -> ChannelResult<Self> {
        Self::open(name, true)
    }

    /// Attach to an existing channel as a non-creator.
    ///
    /// Teardown of an attacher releases only its own mapping and
    /// descriptors, leaving the named resources for other processes.
    pub fn attach(name: &str) -> ChannelResult<Self> {
        Self::open(name, false)
    }

    fn open(name: &str, is_creator: bool) -> ChannelResult<Self> {
        let segment = if is_creator {
            SharedSegment::create(name)?
        } else {
            SharedSegment::attach(name)?
        };

        let producer_lock = RoleLock::open(name, Role::Producer, is_creator)?;
        let consumer_lock = RoleLock::open(name, Role::Consumer, is_creator)?;

        info!(name, is_creator, "sample channel ready");

        Ok(Self {
            segment,
            producer_lock,
            consumer_lock,
        })
    }

    /// Producer cycle: overwrite all samples and the timestamp in place.
    ///
    /// Holds the producer lock for the duration of the write.
    pub fn publish(&mut self, values: [f32; SAMPLE_COUNT], timestamp_ms: i64) -> ChannelResult<()> {
        let guard = self.producer_lock.acquire()?;

        let record = self.segment.view_mut();
        record.values = values;
        record.timestamp_ms = timestamp_ms;

        guard.release()
    }

    /// Consumer cycle: copy the whole record out under the consumer lock.
    pub fn snapshot(&mut self) -> ChannelResult<SampleRecord> {
        let guard = self.consumer_lock.acquire()?;
        let record = *self.segment.view();
        guard.release()?;
        Ok(record)
    }

    /// Run `f` against the mutable record under the producer lock.
    ///
    /// For callers that update the record partially instead of through
    /// [`publish`](Self::publish); the same bracket discipline applies.
    pub fn with_record_mut<R>(
        &mut self,
        f: impl FnOnce(&mut SampleRecord) -> R,
    ) -> ChannelResult<R> {
        let guard = self.producer_lock.acquire()?;
        let out = f(self.segment.view_mut());
        guard.release()?;
        Ok(out)
    }

    /// Run `f` against the shared record under the consumer lock.
    pub fn with_record<R>(&mut self, f: impl FnOnce(&SampleRecord) -> R) -> ChannelResult<R> {
        let guard = self.consumer_lock.acquire()?;
        let out = f(self.segment.view());
        guard.release()?;
        Ok(out)
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        self.segment.name()
    }

    /// Whether this handle owns creation and final removal.
    pub fn is_creator(&self) -> bool {
        self.segment.is_creator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChannelError;

    fn unique(name: &str) -> String {
        format!("{}_{}", name, std::process::id())
    }

    #[test]
    fn attacher_sees_zeroed_record() {
        let name = unique("ch_zero");
        let _creator = SampleChannel::create(&name).unwrap();

        let mut attacher = SampleChannel::attach(&name).unwrap();
        assert_eq!(attacher.snapshot().unwrap(), SampleRecord::default());
    }

    #[test]
    fn publish_then_snapshot_roundtrip() {
        let name = unique("ch_round");
        let mut creator = SampleChannel::create(&name).unwrap();
        let mut attacher = SampleChannel::attach(&name).unwrap();

        let mut values = [0.0f32; SAMPLE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = 1.0 + i as f32;
        }
        creator.publish(values, 1_700_000_000_000).unwrap();

        let record = attacher.snapshot().unwrap();
        assert_eq!(record.values, values);
        assert_eq!(record.timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn partial_update_under_lock() {
        let name = unique("ch_partial");
        let mut channel = SampleChannel::create(&name).unwrap();

        channel
            .with_record_mut(|record| {
                record.values[0] = 2.25;
            })
            .unwrap();

        let first = channel.with_record(|record| record.values[0]).unwrap();
        assert_eq!(first, 2.25);
    }

    #[test]
    fn attach_without_creator_fails() {
        let result = SampleChannel::attach("ch_nobody_created_this");
        assert!(matches!(result, Err(ChannelError::Attach { .. })));
    }
}

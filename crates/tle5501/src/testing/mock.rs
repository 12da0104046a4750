extern crate std;

use std::vec::Vec;

use crate::channel::Channel;
use crate::data::RawSample;
use crate::error::Error;
use crate::interface::{Interface, sealed};

#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    channels: [u16; 4],
    reads: Vec<Channel>,
    faulted: bool,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            channels: [0u16; 4],
            reads: Vec::new(),
            faulted: false,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_sample(mut self, sample: RawSample) -> Self {
        self.set_sample(sample);
        self
    }

    pub(crate) fn with_fault(mut self) -> Self {
        self.faulted = true;
        self
    }

    pub(crate) fn set_sample(&mut self, sample: RawSample) {
        self.channels = [sample.sin_p, sample.sin_n, sample.cos_p, sample.cos_n];
    }

    #[allow(dead_code)]
    pub(crate) fn set_channel(&mut self, channel: Channel, value: u16) {
        self.channels[channel.index() as usize] = value;
    }

    pub(crate) fn reads(&self) -> &[Channel] {
        &self.reads
    }
}

impl Interface for MockInterface {
    async fn read_channel(&mut self, channel: Channel) -> Result<u16, Error> {
        self.reads.push(channel);
        if self.faulted {
            return Err(Error::Bus);
        }
        Ok(self.channels[channel.index() as usize])
    }
}

impl sealed::Sealed for MockInterface {}

//! Test doubles for driver unit tests.

pub(crate) mod mock;

pub(crate) use mock::MockInterface;

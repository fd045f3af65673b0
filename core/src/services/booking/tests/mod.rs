//! Test suite for the booking lifecycle service

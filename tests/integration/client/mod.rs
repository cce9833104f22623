//! Client request construction tests

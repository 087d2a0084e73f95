mod batch_tests;
mod mocks;

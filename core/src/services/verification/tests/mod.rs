
mod concurrency_tests;

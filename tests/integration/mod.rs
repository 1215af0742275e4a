mod batch_test;
mod web_test;

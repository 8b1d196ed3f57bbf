pub mod aws_batch;

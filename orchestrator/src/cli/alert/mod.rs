pub mod aws_sns;

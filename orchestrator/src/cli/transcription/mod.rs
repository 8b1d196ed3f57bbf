pub mod aws_transcribe;

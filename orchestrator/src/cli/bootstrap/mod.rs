pub mod aws_codebuild;

mod support;

mod init;

pub mod storage_error;

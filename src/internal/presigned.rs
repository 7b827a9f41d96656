//! 预签名上传适配器：先向后端申请上传地址与表单字段，再以 multipart 表单直传存储端。

pub mod functions;
pub mod raw_xml;
pub mod structs;

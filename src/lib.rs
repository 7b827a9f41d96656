/// 内部实现模块
mod internal;


/// 核心入口：上传组件
pub use internal::widget::structs::{FileUploadProgress, FileUploadProgressBuilder};

/// 分段映射与渲染
pub mod segments {
    use crate::internal;
    pub use internal::segments::functions::filled_segments::*;
    pub use internal::segments::structs::*;
    pub use internal::segments::structs::segment_style::{
        DEFAULT_EMPTY_GLYPH, DEFAULT_FILLED_GLYPH, DEFAULT_SEPARATOR,
    };
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}

/// 上传状态模型与纯状态转换
pub mod upload_state {
    use crate::internal;
    pub use internal::upload_state::enums::*;
    pub use internal::upload_state::structs::*;
    pub use internal::upload_state::structs::selected_file::DEFAULT_MIME_TYPE;
    pub use internal::upload_state::structs::upload_state::COMPLETE_PERCENT;
}

/// 模拟进度源
pub mod simulator {
    use crate::internal;
    pub use internal::simulator::constants::*;
    pub use internal::simulator::structs::*;
}

/// 传输适配接口：不绑定具体协议
pub mod transport {
    use crate::internal;
    pub use internal::transport::structs::*;
    pub use internal::transport::structs::progress_sink::percent_of;
    pub use internal::transport::traits::upload_hook::*;
    pub use internal::transport::traits::upload_transport::*;
}

/// 预签名直传适配器
pub mod presigned {
    use crate::internal;
    pub use internal::presigned::functions::object_url::object_url;
    pub use internal::presigned::raw_xml::storage_error::StorageErrorBody;
    pub use internal::presigned::structs::*;
    pub use internal::presigned::structs::presigned_config::{
        DEFAULT_FILE_FIELD, DEFAULT_PRESIGN_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STREAM_BUFFER_SIZE,
    };
}

pub mod widget {
    use crate::internal;
    pub use internal::widget::structs::*;
    pub use internal::widget::structs::widget_config::DEFAULT_TOTAL_SEGMENTS;
    pub use internal::widget::structs::widget_view::FALLBACK_FILE_LABEL;
}

pub mod logging {
    use crate::internal;
    pub use internal::logging::*;
}

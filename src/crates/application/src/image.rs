use crate::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use domain::value::ImageRef;
use futures::stream::BoxStream;
use std::path::PathBuf;

/// Chunked upload body. Bounded memory: chunks are written out as they
/// arrive, the full payload is never materialized.
pub type ImageStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// An image resolved for serving: validated absolute path plus what a
/// response needs to describe it.
#[derive(Debug)]
pub struct ImageFile {
    pub path: PathBuf,
    pub len: u64,
    pub mime: String,
}

/// 图片存储
///
/// 单个资产的状态机：Absent → Caching → {Cached | Discarded} → Promoted。
/// 上传先落入暂存命名空间，业务记录提交时才提升为永久引用；
/// 任何非完整成功的写入路径都不留下残文件。
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 校验并流式写入暂存区，返回暂存引用
    ///
    /// 拒绝条件：MIME 不在白名单（InvalidContentType）、声明长度超上限
    /// （PayloadTooLarge）、实际字节数与声明不符（LengthMismatch）。
    async fn cache(
        &self,
        stream: ImageStream,
        declared_mime: &str,
        declared_len: u64,
    ) -> Result<ImageRef, AppError>;

    /// 把暂存引用原子地移入 `dest_namespace` 下，返回永久引用
    ///
    /// 非暂存引用原样返回（幂等）；越界引用一律拒绝。
    async fn promote(
        &self,
        reference: &ImageRef,
        dest_namespace: &str,
    ) -> Result<ImageRef, AppError>;

    /// 解析引用供读取，目标必须是根目录下可读的普通文件
    async fn open(&self, reference: &ImageRef) -> Result<ImageFile, AppError>;
}

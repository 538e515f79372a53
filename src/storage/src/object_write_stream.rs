// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Upload objects whose contents are produced incrementally.
//!
//! The stream buffers all the data written to it, and uploads the object in a
//! single request when the stream is closed. The upload is atomic: either the
//! object is created with all the data, or the object is not created at all.
//! This also means the upload can be safely retried from the start.

use crate::Result;
use crate::model::ObjectMetadata;

/// Uploads the buffered contents of a [ObjectWriteStream].
///
/// The HTTP transport implements this trait, and the decorators wrap it to
/// log or retry the upload.
#[async_trait::async_trait]
pub trait ObjectUploader: Send + Sync + std::fmt::Debug {
    /// Uploads `contents` as the full object contents.
    ///
    /// This can be called more than once, each call creates a new revision of
    /// the object.
    async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata>;
}

/// Accumulates the contents for a new object.
///
/// # Example
/// ```
/// # use storage_raw_client::client::Storage;
/// # async fn sample(client: &Storage) -> anyhow::Result<()> {
/// let mut stream = client.write_object("my-bucket", "my-object").await?;
/// stream.write("hello ");
/// stream.write("world");
/// let object = stream.close().await?;
/// println!("object={object:?}");
/// # Ok(()) }
/// ```
pub struct ObjectWriteStream {
    buffer: bytes::BytesMut,
    uploader: Box<dyn ObjectUploader>,
}

impl ObjectWriteStream {
    pub fn new(uploader: Box<dyn ObjectUploader>) -> Self {
        Self {
            buffer: bytes::BytesMut::new(),
            uploader,
        }
    }

    /// Appends `data` to the object contents.
    pub fn write<B: AsRef<[u8]>>(&mut self, data: B) {
        self.buffer.extend_from_slice(data.as_ref());
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Uploads the contents and returns the metadata of the new object.
    pub async fn close(self) -> Result<ObjectMetadata> {
        self.uploader.upload(self.buffer.freeze()).await
    }

    /// Replaces the uploader, keeping any data already written.
    pub(crate) fn map_uploader<F>(self, f: F) -> Self
    where
        F: FnOnce(Box<dyn ObjectUploader>) -> Box<dyn ObjectUploader>,
    {
        Self {
            buffer: self.buffer,
            uploader: f(self.uploader),
        }
    }
}

impl std::fmt::Debug for ObjectWriteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectWriteStream")
            .field("buffered_bytes", &self.buffer.len())
            .field("uploader", &self.uploader)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use gax::error::{Status, StatusCode};
    use std::sync::{Arc, Mutex};

    /// Records the uploaded contents, and returns the configured results in
    /// order.
    #[derive(Debug, Default)]
    pub(crate) struct FakeUploader {
        pub uploads: Arc<Mutex<Vec<bytes::Bytes>>>,
        pub results: Mutex<Vec<Result<ObjectMetadata>>>,
    }

    impl FakeUploader {
        pub fn new(results: Vec<Result<ObjectMetadata>>) -> Self {
            Self {
                uploads: Arc::default(),
                results: Mutex::new(results.into_iter().rev().collect()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ObjectUploader for FakeUploader {
        async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata> {
            self.uploads.lock().unwrap().push(contents.clone());
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(Status::new(StatusCode::Unknown, "no more results")))
        }
    }

    #[tokio::test]
    async fn write_and_close() -> anyhow::Result<()> {
        let object = ObjectMetadata::default().set_name("my-object").set_size(11_u64);
        let uploader = FakeUploader::new(vec![Ok(object.clone())]);
        let uploads = uploader.uploads.clone();
        let mut stream = ObjectWriteStream::new(Box::new(uploader));
        assert!(stream.is_empty());
        stream.write("hello ");
        stream.write(b"world");
        stream.write(Vec::<u8>::new());
        assert_eq!(stream.len(), 11);
        let fmt = format!("{stream:?}");
        assert!(fmt.contains("buffered_bytes: 11"), "{fmt}");

        let got = stream.close().await?;
        assert_eq!(got, object);
        assert_eq!(
            *uploads.lock().unwrap(),
            vec![bytes::Bytes::from_static(b"hello world")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn close_error() {
        let uploader = FakeUploader::new(vec![Err(Status::http(412, "precondition failed"))]);
        let stream = ObjectWriteStream::new(Box::new(uploader));
        let status = stream.close().await.unwrap_err();
        assert_eq!(status.code(), StatusCode::PermanentFailure);
    }

    #[derive(Debug)]
    struct Prefixed(Box<dyn ObjectUploader>);

    #[async_trait::async_trait]
    impl ObjectUploader for Prefixed {
        async fn upload(&self, contents: bytes::Bytes) -> Result<ObjectMetadata> {
            let mut data = bytes::BytesMut::from("prefix:");
            data.extend_from_slice(&contents);
            self.0.upload(data.freeze()).await
        }
    }

    #[tokio::test]
    async fn map_uploader() -> anyhow::Result<()> {
        let uploader = FakeUploader::new(vec![Ok(ObjectMetadata::default())]);
        let uploads = uploader.uploads.clone();
        let mut stream = ObjectWriteStream::new(Box::new(uploader));
        stream.write("abc");
        let mut stream = stream.map_uploader(|u| Box::new(Prefixed(u)));
        stream.write("def");
        stream.close().await?;
        assert_eq!(
            *uploads.lock().unwrap(),
            vec![bytes::Bytes::from_static(b"prefix:abcdef")]
        );
        Ok(())
    }
}

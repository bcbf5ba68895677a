// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{EncodeError, ProfileDocument};
use flate2::write::GzEncoder;
use flate2::Compression;
use prost::Message;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Validates `doc` and returns it as a gzipped pprof protobuf, the format
/// `go tool pprof` and friends expect on disk.
pub fn encode_profile(doc: &ProfileDocument) -> Result<Vec<u8>, EncodeError> {
    doc.validate()?;
    let pprof = doc.to_pprof();

    let mut buffer = Vec::with_capacity(pprof.encoded_len());
    pprof.encode(&mut buffer)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&buffer)?;
    Ok(encoder.finish()?)
}

/// Writes `doc` to `destination`.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed over it, so the destination either holds the complete profile or
/// is left as it was.
pub fn write_profile<P: AsRef<Path>>(
    doc: &ProfileDocument,
    destination: P,
) -> Result<(), EncodeError> {
    let destination = destination.as_ref();
    let encoded = encode_profile(doc)?;

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&encoded)?;
    file.as_file().sync_all()?;
    file.persist(destination)?;

    debug!(
        bytes = encoded.len(),
        path = %destination.display(),
        "Wrote pprof"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callgraph::FunctionIdentity;
    use crate::pprof::{proto, EncoderConfig, ProfileEncoder, ValidationError};
    use crate::synthesis;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn decode(bytes: &[u8]) -> proto::Profile {
        let mut raw = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut raw).unwrap();
        proto::Profile::decode(raw.as_slice()).unwrap()
    }

    fn document() -> ProfileDocument {
        let root = FunctionIdentity::new("main", "main");
        let leaf = FunctionIdentity::new("fmt", "Println");
        ProfileEncoder::with_config(EncoderConfig::default().with_time_nanos(1234)).encode(&[
            synthesis::Sample {
                frames: vec![&root, &leaf],
                count: 3,
            },
        ])
    }

    #[test]
    fn encoded_bytes_decode_back() {
        let bytes = encode_profile(&document()).unwrap();
        let pprof = decode(&bytes);
        assert_eq!(pprof.time_nanos, 1234);
        assert_eq!(pprof.samples.len(), 1);
        assert_eq!(pprof.samples[0].location_ids, vec![1, 2]);
        assert_eq!(pprof.samples[0].values, vec![3]);
        let leaf_name = pprof.functions[0].name as usize;
        assert_eq!(pprof.string_table[leaf_name], "fmt.Println");
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static.pprof");
        write_profile(&document(), &path).unwrap();
        let pprof = decode(&std::fs::read(&path).unwrap());
        assert_eq!(pprof.functions.len(), 2);
        assert_eq!(pprof.mappings[0].id, 1);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn invalid_document_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static.pprof");
        let mut doc = document();
        doc.samples[0].location_ids.push(99);

        let err = write_profile(&doc, &path).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Validation(ValidationError::UnknownLocation(99))
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("static.pprof");
        let err = write_profile(&document(), &path).unwrap_err();
        assert!(matches!(err, EncodeError::Io(_)));
        assert!(!path.exists());
    }
}

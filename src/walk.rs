use async_stream::stream;
use futures_lite::StreamExt;

use crate::CandidateStream;
use crate::Error;
use crate::ImportCandidate;
use crate::ItemKind;
use crate::ItemSource;
use crate::SourceOptions;

/// Walks one source item and produces a lazy, depth-first, pre-order
/// stream of import candidates.
///
/// Directory candidates (suppressed by
/// [`only_files`](SourceOptions::only_files)) always precede their
/// children. Items whose name starts with `.` are skipped together with
/// their subtree unless [`hidden`](SourceOptions::hidden) is set. Errors
/// are yielded in-stream and end only the branch that produced them;
/// whether to keep pulling after an error is the consumer's decision.
///
/// The stream is single-pass. Dropping it before exhaustion is the only
/// cancellation mechanism.
///
/// # Arguments
/// * `source` - The capability set for the item's source family.
/// * `item` - The root item to walk.
/// * `options` - Per-call traversal policy.
pub fn candidates<'a, S>(
    source: &'a S,
    item: S::Item,
    options: SourceOptions,
) -> CandidateStream<'a>
where
    S: ItemSource + Sync,
{
    if !options.prefix.is_empty() && !options.prefix.ends_with('/') {
        let what = format!("prefix must end with '/': {}", options.prefix);
        return Box::pin(futures_lite::stream::once(Err(Error::InvalidArgument(what))));
    }
    let prefix = options.prefix.clone();
    walk_item(source, item, prefix, options)
}

/// Recursive step. The prefix is computed fresh per level and the options
/// are cloned per child, so sibling branches never observe each other's
/// state.
fn walk_item<'a, S>(
    source: &'a S,
    item: S::Item,
    prefix: String,
    options: SourceOptions,
) -> CandidateStream<'a>
where
    S: ItemSource + Sync,
{
    Box::pin(stream! {
        let name = source.name(&item);
        if name.starts_with('.') && !options.hidden {
            log::debug!("skipping hidden item {prefix}{name}");
            return;
        }
        let path = format!("{prefix}{name}");

        match source.kind(&item) {
            ItemKind::Directory => {
                if !options.only_files {
                    yield Ok(ImportCandidate {
                        path: path.clone(),
                        content: None,
                        mtime: options.mtime,
                        mode: options.mode,
                    });
                }
                log::trace!("descending into {path}");
                let child_prefix = format!("{path}/");
                let mut entries = source.entries(&item);
                while let Some(next) = entries.next().await {
                    match next {
                        Ok(child) => {
                            let mut sub = walk_item(
                                source,
                                child,
                                child_prefix.clone(),
                                options.clone(),
                            );
                            while let Some(candidate) = sub.next().await {
                                yield candidate;
                            }
                        }
                        Err(e) => {
                            // The cursor cannot be trusted after a failed
                            // read; end this directory's enumeration.
                            yield Err(e);
                            break;
                        }
                    }
                }
            }
            ItemKind::File => match source.file(&item).await {
                Ok(data) => {
                    let (modified, content) = data.into_parts();
                    let mtime = if options.preserve_mtime {
                        Some(modified)
                    } else {
                        options.mtime
                    };
                    yield Ok(ImportCandidate {
                        path,
                        content: Some(content),
                        mtime,
                        mode: options.mode,
                    });
                }
                Err(e) => {
                    yield Err(e);
                }
            },
            ItemKind::Other => {
                yield Err(Error::UnsupportedKind { what: path });
            }
        }
    })
}

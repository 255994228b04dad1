use super::worker::ProcessResult;
use std::path::{Path, PathBuf};
use std::thread::{available_parallelism, scope};

/// Run `work` on all files in parallel and collect results, in file order.
pub(crate) fn process_all<F>(files: &[PathBuf], work: F) -> Vec<ProcessResult>
where
    F: Fn(&Path) -> ProcessResult + Sync,
{
    let num_threads = available_parallelism().map_or(1, |n| n.get());
    let oversubscribe = 4;
    let total_chunks = num_threads * oversubscribe;
    let chunk_size = files.len().div_ceil(total_chunks).max(1);
    let work = &work;

    scope(|s| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|file| work(file.as_path()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        // Flatten results from all threads
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    })
}

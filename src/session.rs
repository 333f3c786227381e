//! Page visits against one shared request cache
//!
//! A `Session` owns the API client and the cache for the lifetime of a CLI
//! invocation. One-shot subcommands visit a single page; the interactive
//! shell visits many pages against the same cache, so revisiting a page
//! shows the cached response instead of fetching again.

use std::io::{self, Write};

use futures::future::join_all;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, GifPage, Payload};
use crate::cache::{CacheEntry, CacheKey, RequestCache};
use crate::pages::{PageRequest, Query};
use crate::render::{render_cache_listing, render_entry, render_page_list};

/// The cache shared by every page
pub type PageCache = RequestCache<Payload, ApiError>;

pub type PageEntry = CacheEntry<Payload, ApiError>;

const SHELL_HELP: &str = "\
Shell commands:
  <page> [args]          Visit a page (cached responses are reused)
  refresh <page> [args]  Fetch the page again, ignoring the cache
  invalidate <page> [args]
                         Forget the cached responses of a page
  cache                  List cached keys and their status
  list                   List pages
  help                   Show this help
  quit                   Leave the shell
";

pub struct Session {
    client: ApiClient,
    cache: PageCache,
}

impl Session {
    pub fn new(client: ApiClient, cache: PageCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Shows a page, fetching only the queries without a cached success
    ///
    /// Returns the settled entries in query order.
    pub async fn visit<W: Write>(
        &self,
        request: &PageRequest,
        out: &mut W,
    ) -> io::Result<Vec<PageEntry>> {
        self.show(request, false, out).await
    }

    /// Shows a page after fetching every query again
    pub async fn refresh<W: Write>(
        &self,
        request: &PageRequest,
        out: &mut W,
    ) -> io::Result<Vec<PageEntry>> {
        self.show(request, true, out).await
    }

    /// Resets the entries of a page to idle; returns how many were held
    pub fn invalidate(&self, request: &PageRequest) -> usize {
        let held = self.cache.keys();
        let mut count = 0;
        for key in request.queries.iter().map(Query::key) {
            if held.contains(&key) {
                self.cache.invalidate(&key);
                count += 1;
            }
        }
        count
    }

    async fn show<W: Write>(
        &self,
        request: &PageRequest,
        force: bool,
        out: &mut W,
    ) -> io::Result<Vec<PageEntry>> {
        let planet_filter = request.planet_filter.as_deref();

        let mut keys: Vec<(&Query, CacheKey)> = Vec::new();
        for query in &request.queries {
            let key = query.key();
            self.start(query, &key, force);
            keys.push((query, key));
        }

        for (query, key) in &keys {
            let entry = self.cache.get(key);
            if entry.is_pending() {
                out.write_all(render_entry(query.label(), &entry, planet_filter).as_bytes())?;
            }
        }
        out.flush()?;

        // Queries of one page settle concurrently
        let entries = join_all(keys.iter().map(|(_, key)| self.cache.settled(key))).await;

        for ((query, key), entry) in keys.iter().zip(&entries) {
            if let Some(error) = &entry.error {
                warn!(key = %key, error = %error, "request failed");
            }
            let shown = self.with_earlier_gifs(query, entry);
            let shown = shown.as_ref().unwrap_or(entry);
            out.write_all(render_entry(query.label(), shown, planet_filter).as_bytes())?;
        }
        out.flush()?;

        Ok(entries)
    }

    /// For a later giphy page, the cached pages of the same term that lead
    /// up to it followed by the page itself. `None` unless every earlier page
    /// of the chain is cached.
    fn with_earlier_gifs(&self, query: &Query, entry: &PageEntry) -> Option<PageEntry> {
        let Query::Gifs { term, offset } = query else {
            return None;
        };
        let Some(Payload::Gifs(latest)) = &entry.data else {
            return None;
        };
        if *offset == 0 || !entry.is_success() {
            return None;
        }

        let held = self.cache.keys();
        let mut earlier: Option<GifPage> = None;
        let mut next = 0;
        while next < *offset {
            let key = Query::Gifs {
                term: term.clone(),
                offset: next,
            }
            .key();
            if !held.contains(&key) {
                return None;
            }
            let Some(Payload::Gifs(page)) = self.cache.get(&key).data else {
                return None;
            };
            next = page.next_offset()?;
            earlier = Some(match earlier {
                Some(pages) => pages.followed_by(page),
                None => page,
            });
        }
        if next != *offset {
            return None;
        }

        let mut shown = entry.clone();
        shown.data = Some(Payload::Gifs(earlier?.followed_by(latest.clone())));
        Some(shown)
    }

    fn start(&self, query: &Query, key: &CacheKey, force: bool) {
        let client = self.client.clone();
        let query = query.clone();
        let producer = move || query.run(client);

        if force {
            self.cache.refetch(key, producer);
        } else if self.cache.get(key).is_success() {
            debug!(key = %key, "using cached response");
        } else {
            self.cache.trigger(key, producer);
        }
    }

    /// Reads commands line by line until `quit` or end of input
    ///
    /// Invalid commands are reported on `out` and the shell keeps running.
    pub async fn run_shell<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            let line = line.trim();
            let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

            match command {
                "" => continue,
                "quit" | "exit" => break,
                "help" => {
                    out.write_all(render_page_list().as_bytes())?;
                    writeln!(out)?;
                    out.write_all(SHELL_HELP.as_bytes())?;
                }
                "list" => out.write_all(render_page_list().as_bytes())?,
                "cache" => out.write_all(render_cache_listing(&self.cache.snapshot()).as_bytes())?,
                "refresh" => match PageRequest::parse_line(rest) {
                    Ok(request) => {
                        self.refresh(&request, out).await?;
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                },
                "invalidate" => match PageRequest::parse_line(rest) {
                    Ok(request) => {
                        let count = self.invalidate(&request);
                        writeln!(out, "Invalidated {} cached entries", count)?;
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                },
                _ => match PageRequest::parse_line(line) {
                    Ok(request) => {
                        self.visit(&request, out).await?;
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                },
            }
        }

        out.flush()
    }
}

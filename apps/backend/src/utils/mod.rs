pub mod share_slug;

use std::collections::BTreeMap;
use std::fmt::Write;

use mknote_common::exif::TagIfd;

use crate::descriptor;

impl super::ExifRaw {
    pub fn debug_dump(&mut self) -> String {
        let mut out = String::new();

        let mut ifd_locations: BTreeMap<_, _> = self
            .ifd_locations
            .iter()
            .map(|(ifd, ifd_location)| (*ifd, Some(*ifd_location)))
            .collect();

        for tagifd in self.locations.keys() {
            ifd_locations.entry(tagifd.ifd).or_default();
        }

        for (ifd, ifd_location) in ifd_locations {
            let _ = writeln!(out, "\n{ifd:?} - Defined {ifd_location:?}");
            out.push_str("------------------------------\n");

            let tags = self.tags(ifd).collect::<Vec<_>>();
            for tagifd in tags {
                let Some(entry) = self.lookup_entry(tagifd) else {
                    continue;
                };

                let name = descriptor::lookup_tag_name(tagifd, self.makernote)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| tagifd.tag.to_string());

                let _ = writeln!(
                    out,
                    "{name} {:?}({}): {:?}",
                    entry.data_type, entry.count, entry.value_offset
                );
                out.push_str(&self.debug_dump_entry(tagifd));
                out.push('\n');
            }
        }

        out
    }

    pub fn debug_dump_entry(&mut self, tagifd: TagIfd) -> String {
        match self.lookup_value(tagifd) {
            Ok(Some(value)) => value.to_string(),
            Ok(None) => String::from("Not found"),
            Err(err) => format!("{err}"),
        }
    }
}

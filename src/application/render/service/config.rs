use comrak::options::Options;

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;
    ext.description_lists = true;

    // Documentation pages embed trusted raw HTML; heading ids are assigned
    // after conversion, so comrak's own `header_ids` stays off.
    let render = &mut options.render;
    render.r#unsafe = true;
    render.sourcepos = false;
}

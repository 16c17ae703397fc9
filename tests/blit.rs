use glrt::gl;
use glrt::image::ImageGl;
use glrt::texture::TextureFormat;
use glrt::CommandContext;

use crate::support::{Call, FakeImage, FakeLayer};

mod support;

fn build_image(ctxt: &mut CommandContext<'_>, owner: &mut FakeImage) -> ImageGl {
    let mut image = ImageGl::new(ctxt);
    image.update(owner, ctxt, false).unwrap();
    image
}

#[test]
fn matching_depth_formats_blit_in_one_call() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner.depth = Some(FakeLayer::new(ctxt, 11, (64, 64), TextureFormat::Depth24));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner.depth = Some(FakeLayer::new(ctxt, 21, (64, 64), TextureFormat::Depth24));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let calls = handle.calls();
        let blits: Vec<Call> = calls
            .iter()
            .filter(|c| matches!(c, Call::Blit { .. }))
            .cloned()
            .collect();
        assert_eq!(
            blits,
            vec![Call::Blit {
                mask: gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
                filter: gl::NEAREST
            }]
        );
        // nothing left for the pixel-buffer path
        assert_eq!(handle.count(|c| matches!(c, Call::TexSubImage2D { .. })), 0);

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn blit_bindings_are_set_and_restored() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let binds: Vec<Call> = handle
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::BindFramebuffer { .. }))
            .collect();
        assert_eq!(
            binds,
            vec![
                Call::BindFramebuffer {
                    target: gl::READ_FRAMEBUFFER,
                    framebuffer: source.fbo().id()
                },
                Call::BindFramebuffer {
                    target: gl::DRAW_FRAMEBUFFER,
                    framebuffer: target.fbo().id()
                },
                Call::BindFramebuffer {
                    target: gl::DRAW_FRAMEBUFFER,
                    framebuffer: 0
                },
                Call::BindFramebuffer {
                    target: gl::READ_FRAMEBUFFER,
                    framebuffer: 0
                },
            ]
        );

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn additional_color_layers_pair_by_position() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 11, (64, 64), TextureFormat::Rgba16f));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 21, (64, 64), TextureFormat::Rgba16f));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let calls = handle.calls();
        assert_eq!(handle.count(|c| matches!(c, Call::Blit { .. })), 2);
        assert!(calls.contains(&Call::ReadBuffer(gl::COLOR_ATTACHMENT1)));
        assert!(calls.contains(&Call::DrawBuffer(gl::COLOR_ATTACHMENT1)));
        // the buffer selections are put back afterwards
        assert!(calls.contains(&Call::ReadBuffer(gl::COLOR_ATTACHMENT0)));
        assert!(calls.contains(&Call::DrawBuffers(vec![
            gl::COLOR_ATTACHMENT0,
            gl::COLOR_ATTACHMENT1,
        ])));

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn differing_depth_formats_still_ride_the_blit_mask() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner.depth = Some(FakeLayer::new(ctxt, 11, (64, 64), TextureFormat::Depth32f));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner.depth = Some(FakeLayer::new(ctxt, 21, (64, 64), TextureFormat::Depth24));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        // attachment presence, not format, decides the mask
        let calls = handle.calls();
        assert!(calls.contains(&Call::Blit {
            mask: gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
            filter: gl::NEAREST
        }));
        assert_eq!(handle.count(|c| matches!(c, Call::TexSubImage2D { .. })), 0);

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn uncovered_stencil_data_goes_through_a_pixel_buffer_copy() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner.depth = Some(FakeLayer::new(
            ctxt,
            11,
            (64, 64),
            TextureFormat::Depth24Stencil8,
        ));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner.depth = Some(FakeLayer::new(ctxt, 21, (64, 64), TextureFormat::Depth24));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let calls = handle.calls();
        // both framebuffers have depth, only the source has stencil
        assert!(calls.contains(&Call::Blit {
            mask: gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT,
            filter: gl::NEAREST
        }));
        // one pack/unpack round trip, in the source's transfer format
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, Call::TexSubImage2D { .. }))
                .cloned()
                .collect::<Vec<_>>(),
            vec![Call::TexSubImage2D {
                width: 64,
                height: 64,
                format: gl::DEPTH_STENCIL
            }]
        );
        assert!(calls.contains(&Call::GetTexImage {
            format: gl::DEPTH_STENCIL,
            ty: gl::UNSIGNED_INT_24_8
        }));
        assert!(calls.contains(&Call::BufferData {
            target: gl::PIXEL_PACK_BUFFER,
            size: 64 * 64 * 4
        }));
        assert_eq!(handle.count(|c| matches!(c, Call::DeleteBuffer(_))), 1);

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn aligned_picking_slots_are_covered_by_the_positional_pass() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner.picking = Some(FakeLayer::new(ctxt, 12, (64, 64), TextureFormat::R32Ui));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner.picking = Some(FakeLayer::new(ctxt, 22, (64, 64), TextureFormat::R32Ui));

        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);
        assert_eq!(source.picking_attachment(), gl::COLOR_ATTACHMENT7);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let calls = handle.calls();
        assert!(calls.contains(&Call::ReadBuffer(gl::COLOR_ATTACHMENT7)));
        assert!(calls.contains(&Call::DrawBuffer(gl::COLOR_ATTACHMENT7)));
        assert_eq!(handle.count(|c| matches!(c, Call::Blit { .. })), 2);
        // covered by the blit, so no pixel-buffer round trip
        assert_eq!(handle.count(|c| matches!(c, Call::TexSubImage2D { .. })), 0);
        // the buffer selections are put back afterwards
        assert!(calls.contains(&Call::ReadBuffer(gl::COLOR_ATTACHMENT0)));
        assert!(calls.contains(&Call::DrawBuffers(vec![
            gl::COLOR_ATTACHMENT0,
            gl::COLOR_ATTACHMENT7,
        ])));

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}

#[test]
fn misaligned_picking_slots_fall_back_to_a_pixel_buffer_copy() {
    let (context, handle) = support::build_context();
    context.exec(|ctxt| {
        let mut src_owner = FakeImage::default();
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 10, (64, 64), TextureFormat::Rgba8));
        src_owner
            .colors
            .push(FakeLayer::new(ctxt, 11, (64, 64), TextureFormat::Rgba16f));
        src_owner.picking = Some(FakeLayer::new(ctxt, 12, (64, 64), TextureFormat::R32Ui));

        let mut dst_owner = FakeImage::default();
        dst_owner
            .colors
            .push(FakeLayer::new(ctxt, 20, (64, 64), TextureFormat::Rgba8));
        dst_owner.picking = Some(FakeLayer::new(ctxt, 22, (64, 64), TextureFormat::R32Ui));

        // source order: color0, color1, picking; target order: color0, picking
        let source = build_image(ctxt, &mut src_owner);
        let mut target = build_image(ctxt, &mut dst_owner);

        handle.clear_calls();
        target.update_from(ctxt, &source);

        let calls = handle.calls();
        // position 1 pairs the second source color with the target picking
        // slot, so the picking data itself was never moved by a blit
        assert!(calls.contains(&Call::ReadBuffer(gl::COLOR_ATTACHMENT1)));
        assert!(calls.contains(&Call::DrawBuffer(gl::COLOR_ATTACHMENT7)));
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, Call::TexSubImage2D { .. }))
                .cloned()
                .collect::<Vec<_>>(),
            vec![Call::TexSubImage2D {
                width: 64,
                height: 64,
                format: gl::RED_INTEGER
            }]
        );

        source.destroy(ctxt);
        target.destroy(ctxt);
    });
}
